//! Single Run: one algorithm, one context, one catch of `Cancelled`
use serde::{Deserialize, Serialize};
use sortrace_algorithms::AlgorithmKind;
use sortrace_core::{
    CancellationToken, ExecutionContext, Pacer, RunObserver, Sequence, SingleRunContext, SortError,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub algorithm: AlgorithmKind,
    pub status: RunStatus,
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed_ms: u64,
    /// Final state of the run's own copy
    pub sequence: Sequence,
}

/// Run `kind` over a fresh copy of `input`.
///
/// Cancellation is not an error here: the run stops where it was, transient
/// highlights are cleared and the summary says `Cancelled`.
pub async fn run_single(
    kind: AlgorithmKind,
    input: &Sequence,
    pacer: Pacer,
    token: CancellationToken,
    observer: Arc<dyn RunObserver>,
) -> Result<RunSummary, SortError> {
    let run_id = Uuid::new_v4();
    let mut ctx = SingleRunContext::new(input.fresh_copy(), pacer, token, observer);
    tracing::info!(%run_id, algorithm = %kind, len = input.len(), "run started");
    ctx.render();

    let status = match kind.run(&mut ctx).await {
        Ok(()) => {
            ctx.complete();
            RunStatus::Completed
        }
        Err(SortError::Cancelled) => {
            ctx.abandon();
            RunStatus::Cancelled
        }
        Err(err) => return Err(err),
    };

    let state = ctx.into_state();
    let summary = RunSummary {
        run_id,
        algorithm: kind,
        status,
        comparisons: state.comparisons(),
        swaps: state.swaps(),
        elapsed_ms: state.elapsed_ms(),
        sequence: state.into_sequence(),
    };
    tracing::info!(
        %run_id,
        algorithm = %kind,
        status = ?summary.status,
        comparisons = summary.comparisons,
        swaps = summary.swaps,
        elapsed_ms = summary.elapsed_ms,
        "run finished"
    );
    Ok(summary)
}
