//! Errors raised while replaying a proposed completion order

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SequenceError {
    #[error("sequence names {found} processes but the state has {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("sequence step {step} names unknown process P{process}")]
    UnknownProcess { step: usize, process: usize },

    #[error("process P{process} appears more than once (again at step {step})")]
    DuplicateProcess { step: usize, process: usize },

    #[error(
        "step {step}: process P{process} needs {need} units of resource {resource} but only {work} are free"
    )]
    NeedExceedsWork {
        step: usize,
        process: usize,
        resource: usize,
        need: u64,
        work: u64,
    },
}

impl UserFacingError for SequenceError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::WrongLength { .. }
            | Self::UnknownProcess { .. }
            | Self::DuplicateProcess { .. } => {
                Some("List every process index exactly once, e.g. --sequence 1,3,4,0,2.")
            }
            Self::NeedExceedsWork { .. } => {
                Some("Run `bankers check` to find an order that does complete.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::WrongLength { .. } => "sequence.wrong_length",
            Self::UnknownProcess { .. } => "sequence.unknown_process",
            Self::DuplicateProcess { .. } => "sequence.duplicate_process",
            Self::NeedExceedsWork { .. } => "sequence.need_exceeds_work",
        })
    }
}
