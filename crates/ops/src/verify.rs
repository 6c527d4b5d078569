//! Replay of a user-proposed completion order

use bankers_errors::Error;
use bankers_events::{AppEvent, EvaluationEvent, EventEmitter, FailureContext, GeneralEvent};
use bankers_safety::ProcessId;
use tracing::info;

use crate::check::{build_evaluator, load_snapshot};
use crate::{OpsCtx, SnapshotSource, VerifyReport};

/// Check whether `sequence` is a safe sequence for the snapshot
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or fails validation.
/// A sequence that does not replay is reported in
/// [`VerifyReport::violation`], not as an error.
pub async fn verify(
    ctx: &OpsCtx,
    source: &SnapshotSource,
    sequence: &[ProcessId],
) -> Result<VerifyReport, Error> {
    ctx.emit(AppEvent::General(GeneralEvent::OperationStarted {
        operation: "verify".to_string(),
    }));
    let snapshot = load_snapshot(source).await?;
    let evaluator = build_evaluator(ctx, &snapshot)?;

    let report = match evaluator.verify_sequence(sequence) {
        Ok(final_resources) => {
            ctx.emit(AppEvent::Evaluation(EvaluationEvent::SequenceAccepted {
                length: sequence.len(),
            }));
            VerifyReport {
                sequence: sequence.to_vec(),
                final_resources: Some(final_resources),
                violation: None,
            }
        }
        Err(violation) => {
            ctx.emit(AppEvent::Evaluation(EvaluationEvent::SequenceRejected {
                failure: FailureContext::from_error(&violation),
            }));
            VerifyReport {
                sequence: sequence.to_vec(),
                final_resources: None,
                violation: Some(violation),
            }
        }
    };

    ctx.emit(AppEvent::General(GeneralEvent::OperationCompleted {
        operation: "verify".to_string(),
        success: report.violation.is_none(),
    }));
    info!(
        length = sequence.len(),
        valid = report.violation.is_none(),
        "sequence verified"
    );
    Ok(report)
}
