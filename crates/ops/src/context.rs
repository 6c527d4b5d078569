//! Operations context for dependency injection

use bankers_config::Config;
use bankers_errors::{Error, OpsError};
use bankers_events::{EventEmitter, EventSender};
use uuid::Uuid;

/// Operations context shared by every command
pub struct OpsCtx {
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// System configuration
    pub config: Config,
    /// Correlation id stamped on every event of this invocation
    pub operation_id: String,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(&self.operation_id)
    }
}

/// Builder for [`OpsCtx`]
#[derive(Default)]
pub struct OpsContextBuilder {
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if the event sender is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        Ok(OpsCtx {
            tx,
            config: self.config.unwrap_or_default(),
            operation_id: Uuid::new_v4().to_string(),
        })
    }
}
