//! bankers - Banker's algorithm safety checker
//!
//! Thin CLI over the ops crate: loads configuration, wires the event channel,
//! runs one command and renders its result.

mod cli;
mod display;
mod error;
mod events;
mod interactive;
mod logging;

use crate::cli::{Cli, Commands, SearchArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use bankers_config::Config;
use bankers_events::EventReceiver;
use bankers_ops::{OperationResult, OpsContextBuilder, OpsCtx, SnapshotSource};
use bankers_snapshot::StateSnapshot;
use bankers_types::{InputFormat, OutputFormat, ProcessId};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tokio::select;
use tracing::{error, info};

/// Exit status when the state or sequence checked out
const EXIT_SAFE: i32 = 0;
/// Exit status for runtime errors
const EXIT_ERROR: i32 = 1;
/// Exit status when the state is unsafe or the sequence was rejected
const EXIT_UNSAFE: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_flag = cli.global.json;

    match run(cli).await {
        Ok(result) => {
            let code = if result.is_success() {
                EXIT_SAFE
            } else {
                EXIT_UNSAFE
            };
            process::exit(code);
        }
        Err(e) => {
            error!("Application error: {}", e);
            if !json_flag {
                eprintln!("Error: {e}");
            }
            process::exit(EXIT_ERROR);
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<OperationResult, CliError> {
    // 1. File config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Environment variables
    config.merge_env()?;

    // 3. CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global, &cli.command);

    let json_mode = config.general.default_output == OutputFormat::Json;
    init_tracing(json_mode, cli.global.debug, &config.log_dir());
    info!("Starting bankers v{}", env!("CARGO_PKG_VERSION"));

    let renderer = OutputRenderer::new(config.general.default_output, config.general.color);

    // Prompts must finish before the command starts consuming events
    let command = match cli.command {
        Commands::Check { file, format, .. } => Command::Check(source(file, format)),
        Commands::Verify {
            file,
            sequence,
            format,
        } => {
            let sequence = bankers_snapshot::parse_sequence(&sequence)?;
            Command::Verify(source(Some(file), format), sequence)
        }
        Commands::Interactive { .. } => {
            let snapshot = interactive::read_snapshot(json_mode).await?;
            Command::Check(SnapshotSource::Inline(snapshot))
        }
        Commands::Template => Command::Template,
    };

    let (event_sender, event_receiver) = bankers_events::channel();
    let ops_ctx = OpsContextBuilder::new()
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    let mut event_handler =
        EventHandler::new(renderer.colors_enabled(), cli.global.debug, json_mode);

    let result =
        execute_command_with_events(command, ops_ctx, event_receiver, &mut event_handler).await?;

    renderer.render_result(&result)?;

    info!(success = result.is_success(), "Command completed");
    Ok(result)
}

/// A command with its arguments resolved
enum Command {
    Check(SnapshotSource),
    Verify(SnapshotSource, Vec<ProcessId>),
    Template,
}

fn source(file: Option<PathBuf>, format: Option<InputFormat>) -> SnapshotSource {
    match file {
        Some(path) if path != Path::new("-") => SnapshotSource::File { path, format },
        _ => SnapshotSource::Stdin { format },
    }
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Command,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, ops_ctx));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(command: Command, ctx: OpsCtx) -> Result<OperationResult, CliError> {
    match command {
        Command::Check(source) => {
            let report = bankers_ops::check(&ctx, &source).await?;
            Ok(OperationResult::Check(report))
        }
        Command::Verify(source, sequence) => {
            let report = bankers_ops::verify(&ctx, &source, &sequence).await?;
            Ok(OperationResult::Verify(report))
        }
        Command::Template => {
            let toml = StateSnapshot::classic().to_toml()?;
            Ok(OperationResult::Template(toml))
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs, command: &Commands) {
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if let Some(color) = global.color {
        config.general.color = color;
    }

    let search = match command {
        Commands::Check { search, .. } | Commands::Interactive { search } => Some(*search),
        Commands::Verify { .. } | Commands::Template => None,
    };
    if let Some(SearchArgs { scan_order, trace }) = search {
        if let Some(order) = scan_order {
            config.evaluation.scan_order = order;
        }
        if trace {
            config.evaluation.trace = true;
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool, log_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;
    let filter = |default: &str| {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
    };

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "bankers-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(filter(
                        "info,bankers=debug,bankers_ops=debug,bankers_safety=debug",
                    ))
                    .init();
                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        // JSON mode: keep stdout clean for the result document
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
}
