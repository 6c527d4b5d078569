//! Command line interface definition

use bankers_types::{ColorChoice, InputFormat, ScanOrder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bankers - Banker's algorithm safety checker
#[derive(Parser)]
#[command(name = "bankers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Banker's algorithm safety checker")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write JSON debug logs to the log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Search options shared by commands that evaluate a state
#[derive(clap::Args, Clone, Copy)]
pub struct SearchArgs {
    /// Which process to try after a grant
    #[arg(long, value_enum, value_name = "ORDER")]
    pub scan_order: Option<ScanOrder>,

    /// Show every grant with the resources before and after it
    #[arg(long)]
    pub trace: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a snapshot is in a safe state
    #[command(alias = "c")]
    Check {
        /// Snapshot file (`-` or omitted reads stdin)
        file: Option<PathBuf>,

        /// Snapshot encoding, guessed from the extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Check that a proposed completion order is safe
    Verify {
        /// Snapshot file (`-` reads stdin)
        file: PathBuf,

        /// Process order, e.g. 1,3,4,0,2 or "P1 P3 P4 P0 P2"
        #[arg(short, long)]
        sequence: String,

        /// Snapshot encoding, guessed from the extension when omitted
        #[arg(long, value_enum)]
        format: Option<InputFormat>,
    },

    /// Enter the state at prompts and check it
    #[command(alias = "i")]
    Interactive {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print the five process sample snapshot as TOML
    Template,
}
