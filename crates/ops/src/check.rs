//! Safety check operation

use bankers_errors::Error;
use bankers_events::{AppEvent, EvaluationEvent, EventEmitter, FailureContext, GeneralEvent};
use bankers_safety::{GrantStep, ProcessId, SafetyEvaluator, SearchObserver};
use bankers_snapshot::StateSnapshot;
use tracing::{info, warn};

use crate::{CheckReport, OpsCtx, SnapshotSource};

/// Forwards search callbacks as events and optionally keeps the steps
struct EventObserver<'a> {
    ctx: &'a OpsCtx,
    steps: Option<Vec<GrantStep>>,
    granted: usize,
}

impl SearchObserver for EventObserver<'_> {
    fn on_pass_started(&mut self, pass: usize) {
        self.ctx
            .emit(AppEvent::Evaluation(EvaluationEvent::PassStarted { pass }));
    }

    fn on_grant(&mut self, step: &GrantStep) {
        self.granted += 1;
        self.ctx
            .emit(AppEvent::Evaluation(EvaluationEvent::ProcessGranted {
                pass: step.pass,
                process: step.process,
                work_after: step.work_after.clone(),
            }));
        if let Some(steps) = self.steps.as_mut() {
            steps.push(step.clone());
        }
    }

    fn on_stall(&mut self, pass: usize, blocked: &[ProcessId]) {
        self.ctx.emit(AppEvent::Evaluation(EvaluationEvent::Stalled {
            pass,
            blocked: blocked.to_vec(),
        }));
    }
}

pub(crate) async fn load_snapshot(source: &SnapshotSource) -> Result<StateSnapshot, Error> {
    match source {
        SnapshotSource::File { path, format } => StateSnapshot::load(path, *format).await,
        SnapshotSource::Stdin { format } => StateSnapshot::load_stdin(*format).await,
        SnapshotSource::Inline(snapshot) => Ok(snapshot.clone()),
    }
}

/// Validate a snapshot and emit a rejection event when it is malformed
pub(crate) fn build_evaluator(
    ctx: &OpsCtx,
    snapshot: &StateSnapshot,
) -> Result<SafetyEvaluator, Error> {
    snapshot.to_evaluator().map_err(|e| {
        ctx.emit(AppEvent::Evaluation(EvaluationEvent::Rejected {
            failure: FailureContext::from_error(&e),
        }));
        e.into()
    })
}

/// Decide whether the snapshot's state is safe
///
/// Uses the scan order and trace setting from the context's configuration.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or fails validation.
/// An unsafe state is a successful check with an unsafe outcome.
pub async fn check(ctx: &OpsCtx, source: &SnapshotSource) -> Result<CheckReport, Error> {
    ctx.emit(AppEvent::General(GeneralEvent::OperationStarted {
        operation: "check".to_string(),
    }));
    let snapshot = load_snapshot(source).await?;
    let (processes, resources) = snapshot.dimensions();
    ctx.emit_debug(format!(
        "loaded snapshot: {processes} processes, {resources} resources"
    ));
    let evaluator = build_evaluator(ctx, &snapshot)?;
    let order = ctx.config.evaluation.scan_order;

    ctx.emit(AppEvent::Evaluation(EvaluationEvent::Started {
        processes: evaluator.num_processes(),
        resources: evaluator.num_resources(),
        order,
    }));

    let mut observer = EventObserver {
        ctx,
        steps: ctx.config.evaluation.trace.then(Vec::new),
        granted: 0,
    };
    let outcome = evaluator.evaluate_with(order, &mut observer);

    ctx.emit(AppEvent::Evaluation(EvaluationEvent::Completed {
        safe: outcome.is_safe(),
        granted: observer.granted,
    }));
    if outcome.is_safe() {
        info!(
            processes = evaluator.num_processes(),
            %order,
            "state is safe"
        );
    } else {
        warn!(
            processes = evaluator.num_processes(),
            granted = observer.granted,
            "state is unsafe"
        );
    }

    ctx.emit(AppEvent::General(GeneralEvent::OperationCompleted {
        operation: "check".to_string(),
        success: outcome.is_safe(),
    }));

    Ok(CheckReport {
        processes: evaluator.num_processes(),
        resources: evaluator.num_resources(),
        order,
        available: evaluator.available().to_vec(),
        need: evaluator.need().clone(),
        outcome,
        steps: observer.steps,
    })
}
