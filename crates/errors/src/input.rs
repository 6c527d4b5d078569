//! Snapshot parsing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InputError {
    #[error("snapshot not found: {path}")]
    NotFound { path: String },

    #[error("failed to parse {format} snapshot: {message}")]
    ParseError { format: String, message: String },

    #[error("invalid token '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },

    #[error("input ended early: expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("unexpected trailing input starting at position {position}")]
    TrailingInput { position: usize },

    #[error("invalid process sequence '{input}'")]
    InvalidSequence { input: String },
}

impl UserFacingError for InputError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("Check the snapshot path, or pipe the state on stdin."),
            Self::ParseError { .. } => {
                Some("Run `bankers template` to see a well-formed snapshot.")
            }
            Self::InvalidToken { .. } | Self::UnexpectedEnd { .. } | Self::TrailingInput { .. } => {
                Some("Text input is: processes, resources, maximum rows, allocation rows, available.")
            }
            Self::InvalidSequence { .. } => Some("Use comma-separated process indices, e.g. 1,3,4,0,2."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotFound { .. } => "input.not_found",
            Self::ParseError { .. } => "input.parse_error",
            Self::InvalidToken { .. } => "input.invalid_token",
            Self::UnexpectedEnd { .. } => "input.unexpected_end",
            Self::TrailingInput { .. } => "input.trailing_input",
            Self::InvalidSequence { .. } => "input.invalid_sequence",
        })
    }
}
