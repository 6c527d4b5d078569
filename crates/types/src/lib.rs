#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the bankers safety checker
//!
//! This crate provides the fundamental types shared by the evaluator, the
//! snapshot loaders and the CLI: dense resource matrices, process
//! identifiers, and the small enums used for configuration.

pub mod matrix;
pub mod process;

pub use matrix::Matrix;
pub use process::ProcessId;

use serde::{Deserialize, Serialize};

/// Order in which the safety search visits unfinished processes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Visit every unfinished process once per pass, in ascending index
    /// order, granting each one that fits; the next pass starts at index 0
    #[default]
    Sweep,
    /// Go back to index 0 after every grant
    #[serde(alias = "restart")]
    RestartAfterGrant,
}

impl ScanOrder {
    /// Parse a user supplied scan order name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sweep" => Some(Self::Sweep),
            "restart" | "restart_after_grant" | "restart-after-grant" => {
                Some(Self::RestartAfterGrant)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ScanOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sweep => write!(f, "sweep"),
            Self::RestartAfterGrant => write!(f, "restart"),
        }
    }
}

impl clap::ValueEnum for ScanOrder {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Sweep, Self::RestartAfterGrant]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Sweep => clap::builder::PossibleValue::new("sweep"),
            Self::RestartAfterGrant => clap::builder::PossibleValue::new("restart"),
        })
    }
}

/// Encoding of an allocation snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Toml,
    Json,
    /// Whitespace separated integers in console order
    Text,
}

impl InputFormat {
    /// Guess the format from a file extension, falling back to text
    #[must_use]
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => write!(f, "toml"),
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl clap::ValueEnum for InputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Toml, Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Toml => clap::builder::PossibleValue::new("toml"),
            Self::Json => clap::builder::PossibleValue::new("json"),
            Self::Text => clap::builder::PossibleValue::new("text"),
        })
    }
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Tty,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Tty
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
