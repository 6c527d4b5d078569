#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for bankers
//!
//! Operations report what they are doing through events instead of printing.
//! The CLI drains the channel, renders progress for the user, and mirrors
//! every event into structured tracing records.

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{AppEvent, EvaluationEvent, FailureContext, GeneralEvent};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Event plus the metadata attached at emission time
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    /// Wrap an event, deriving level and source from the event itself
    #[must_use]
    pub fn new(event: AppEvent) -> Self {
        let meta = EventMeta::new(event.log_level().into(), event.event_source());
        Self { meta, event }
    }

    /// Attach a correlation identifier
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.meta = self.meta.with_correlation_id(correlation_id);
        self
    }
}

/// Type alias for event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for event receiver
pub type EventReceiver = UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout bankers
///
/// Implemented for raw senders and for anything that carries one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Correlation id stamped onto every emitted event
    fn correlation_id(&self) -> Option<&str> {
        None
    }

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            let mut message = EventMessage::new(event);
            if let Some(id) = self.correlation_id() {
                message = message.with_correlation_id(id);
            }
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(message);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit an error event
    fn emit_error(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error(message)));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_wraps_event_with_meta() {
        let (tx, mut rx) = channel();
        tx.emit_warning("state is unsafe");

        let message = rx.recv().await.unwrap();
        assert_eq!(message.meta.level, EventLevel::Warn);
        assert_eq!(message.meta.source, EventSource::General);
        assert!(matches!(
            message.event,
            AppEvent::General(GeneralEvent::Warning { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = channel();
        drop(rx);
        tx.emit_debug("nobody listening");
    }
}
