use serde::{Deserialize, Serialize};

use crate::EventSource;
use bankers_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod evaluation;
pub mod general;

pub use evaluation::EvaluationEvent;
pub use general::GeneralEvent;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, debug logs)
    General(GeneralEvent),

    /// Safety search progress and verdicts
    Evaluation(EvaluationEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::General,
            Self::Evaluation(_) => EventSource::Evaluation,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. })
            | Self::Evaluation(EvaluationEvent::Rejected { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Evaluation(
                EvaluationEvent::Stalled { .. } | EvaluationEvent::SequenceRejected { .. },
            ) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Evaluation(
                EvaluationEvent::PassStarted { .. } | EvaluationEvent::ProcessGranted { .. },
            ) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}
