//! Structured logging integration for events
//!
//! Mirrors every event from the ops layer into a tracing record with
//! structured fields, so `--debug` log files carry the full search history.

use bankers_events::{AppEvent, EvaluationEvent, EventMessage, GeneralEvent};
use tracing::{debug, error, info, warn};

/// Log an event using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();

    match &message.event {
        AppEvent::Evaluation(event) => match event {
            EvaluationEvent::Started {
                processes,
                resources,
                order,
            } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    processes,
                    resources,
                    order = %order,
                    "Safety search started"
                );
            }
            EvaluationEvent::PassStarted { pass } => {
                debug!(source, correlation = ?meta.correlation_id, pass, "Scan pass started");
            }
            EvaluationEvent::ProcessGranted {
                pass,
                process,
                work_after,
            } => {
                debug!(
                    source,
                    correlation = ?meta.correlation_id,
                    pass,
                    process = %process,
                    work_after = ?work_after,
                    "Process granted"
                );
            }
            EvaluationEvent::Stalled { pass, blocked } => {
                warn!(
                    source,
                    correlation = ?meta.correlation_id,
                    pass,
                    blocked = ?blocked,
                    "No process can finish"
                );
            }
            EvaluationEvent::Completed { safe, granted } => {
                info!(
                    source,
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    safe,
                    granted,
                    "Safety search completed"
                );
            }
            EvaluationEvent::Rejected { failure } => {
                error!(
                    source,
                    correlation = ?meta.correlation_id,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Snapshot rejected"
                );
            }
            EvaluationEvent::SequenceAccepted { length } => {
                info!(source, correlation = ?meta.correlation_id, length, "Sequence accepted");
            }
            EvaluationEvent::SequenceRejected { failure } => {
                warn!(
                    source,
                    correlation = ?meta.correlation_id,
                    code = ?failure.code,
                    message = %failure.message,
                    "Sequence rejected"
                );
            }
        },

        AppEvent::General(event) => match event {
            GeneralEvent::Warning { message, context } => {
                warn!(source, context = ?context, "{message}");
            }
            GeneralEvent::Error { message, details } => {
                error!(source, details = ?details, "{message}");
            }
            GeneralEvent::DebugLog { message, context } => {
                debug!(source, context = ?context, "{message}");
            }
            GeneralEvent::OperationStarted { operation } => {
                info!(
                    source,
                    correlation = ?meta.correlation_id,
                    operation = %operation,
                    "Operation started"
                );
            }
            GeneralEvent::OperationCompleted { operation, success } => {
                info!(
                    source,
                    correlation = ?meta.correlation_id,
                    operation = %operation,
                    success,
                    "Operation completed"
                );
            }
        },
    }
}
