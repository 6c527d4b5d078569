#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Allocation snapshots for bankers
//!
//! A snapshot is the raw input to a safety check: maximum claims, current
//! allocations and free resources, exactly as the user wrote them. Values
//! stay signed here so that the evaluator can report negative entries with
//! their position instead of failing inside a parser.

mod text;

pub use text::{check_dimension, parse_sequence, parse_text, MAX_DIMENSION};

use bankers_errors::{Error, InputError, StateError};
use bankers_safety::SafetyEvaluator;
use bankers_types::InputFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Raw allocation state as read from a file or stdin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Declared process count; inferred from `maximum` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes: Option<usize>,
    /// Declared resource type count; inferred from `available` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<usize>,
    pub maximum: Vec<Vec<i64>>,
    pub allocation: Vec<Vec<i64>>,
    pub available: Vec<i64>,
}

impl StateSnapshot {
    /// Five processes over three resource types; safe with sequence
    /// P1 P3 P4 P0 P2
    #[must_use]
    pub fn classic() -> Self {
        Self {
            processes: Some(5),
            resources: Some(3),
            maximum: vec![
                vec![7, 5, 3],
                vec![3, 2, 2],
                vec![9, 0, 2],
                vec![2, 2, 2],
                vec![4, 3, 3],
            ],
            allocation: vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 2],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
            available: vec![3, 3, 2],
        }
    }

    /// Declared dimensions, falling back to the shape of the data
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.processes.unwrap_or(self.maximum.len()),
            self.resources.unwrap_or(self.available.len()),
        )
    }

    /// Validate the snapshot into an evaluator
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the snapshot is malformed or violates the
    /// allocation invariants.
    pub fn to_evaluator(&self) -> Result<SafetyEvaluator, StateError> {
        let (processes, resources) = self.dimensions();
        SafetyEvaluator::new(
            processes,
            resources,
            &self.maximum,
            &self.allocation,
            &self.available,
        )
    }

    /// Parse a snapshot in the given format
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the content does not parse.
    pub fn parse(content: &str, format: InputFormat) -> Result<Self, InputError> {
        match format {
            InputFormat::Toml => toml::from_str(content).map_err(|e| InputError::ParseError {
                format: format.to_string(),
                message: e.to_string(),
            }),
            InputFormat::Json => {
                serde_json::from_str(content).map_err(|e| InputError::ParseError {
                    format: format.to_string(),
                    message: e.to_string(),
                })
            }
            InputFormat::Text => parse_text(content),
        }
    }

    /// Load a snapshot from a file
    ///
    /// The format is taken from `format` or guessed from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load(path: &Path, format: Option<InputFormat>) -> Result<Self, Error> {
        let format = format.unwrap_or_else(|| {
            InputFormat::from_extension(path.extension().and_then(|e| e.to_str()))
        });
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::from(InputError::NotFound {
                    path: path.display().to_string(),
                })
            } else {
                Error::io_with_path(&e, path)
            }
        })?;
        debug!(path = %path.display(), %format, "loading snapshot");
        Self::parse(&content, format).map_err(Into::into)
    }

    /// Read a snapshot from stdin until EOF
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or does not parse.
    pub async fn load_stdin(format: Option<InputFormat>) -> Result<Self, Error> {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        Self::parse(&content, format.unwrap_or(InputFormat::Text)).map_err(Into::into)
    }

    /// Serialize to a TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(Into::into)
    }
}
