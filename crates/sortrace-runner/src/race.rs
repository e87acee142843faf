//! Race Orchestrator: N lanes over identical input, joined and ranked
//!
//! ```text
//! Idle → Running (N lanes live) → Settling → Ranked
//! ```
//!
//! Every lane owns its own copy of the input and its own context. A lane
//! that names an unknown algorithm, or panics, is reported in `failures` and
//! left off the leaderboard; the other lanes are unaffected.

use crate::leaderboard::{self, Finisher, RunResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sortrace_algorithms::AlgorithmKind;
use sortrace_core::{
    CancellationToken, ExecutionContext, Pacer, RaceRunContext, RunObserver, Sequence, SortError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RacePhase {
    Idle,
    Running,
    Settling,
    Ranked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneStatus {
    Finished,
    Cancelled,
}

/// Final state of one launched lane.
#[derive(Debug, Clone, Serialize)]
pub struct LaneReport {
    pub lane: usize,
    pub algorithm: AlgorithmKind,
    pub status: LaneStatus,
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed_ms: u64,
    pub sequence: Sequence,
}

/// A lane that never produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneFailure {
    pub lane: usize,
    pub algorithm: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RaceReport {
    pub race_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// blake3 digest of the shared input values
    pub input_digest: String,
    pub leaderboard: Vec<RunResult>,
    /// Lanes in launch order
    pub lanes: Vec<LaneReport>,
    pub failures: Vec<LaneFailure>,
    pub cancelled: bool,
}

impl RaceReport {
    pub fn winner(&self) -> Option<&RunResult> {
        self.leaderboard.first()
    }

    pub fn lane(&self, algorithm: AlgorithmKind) -> Option<&LaneReport> {
        self.lanes.iter().find(|l| l.algorithm == algorithm)
    }
}

struct LaneOutcome {
    report: LaneReport,
    finish_order: Option<usize>,
}

pub struct RaceOrchestrator {
    pacer: Pacer,
    token: CancellationToken,
    observer: Arc<dyn RunObserver>,
    phase: RacePhase,
}

impl RaceOrchestrator {
    pub fn new(pacer: Pacer, token: CancellationToken, observer: Arc<dyn RunObserver>) -> Self {
        Self {
            pacer,
            token,
            observer,
            phase: RacePhase::Idle,
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    fn enter(&mut self, phase: RacePhase) {
        tracing::info!(from = ?self.phase, to = ?phase, "race phase");
        self.phase = phase;
    }

    /// Race every selector over `input` and wait for all lanes to settle.
    pub async fn run<S: AsRef<str>>(&mut self, selectors: &[S], input: &Sequence) -> RaceReport {
        let race_id = Uuid::new_v4();
        let started_at = Utc::now();
        let input_digest = input.digest();
        let finished = Arc::new(AtomicUsize::new(0));

        self.enter(RacePhase::Running);
        let mut failures = Vec::new();
        let mut handles: Vec<(usize, String, JoinHandle<LaneOutcome>)> = Vec::new();

        for (lane, selector) in selectors.iter().enumerate() {
            let selector = selector.as_ref();
            let kind = match selector.parse::<AlgorithmKind>() {
                Ok(kind) => kind,
                Err(err) => {
                    tracing::warn!(%race_id, lane, selector, error = %err, "lane rejected");
                    failures.push(LaneFailure {
                        lane,
                        algorithm: selector.to_string(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let ctx = RaceRunContext::new(
                kind.id(),
                input.fresh_copy(),
                self.pacer,
                self.token.clone(),
                self.observer.clone(),
            );
            let handle = tokio::spawn(run_lane(lane, kind, ctx, finished.clone()));
            handles.push((lane, selector.to_string(), handle));
        }

        let mut outcomes = Vec::new();
        for (lane, algorithm, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    tracing::warn!(%race_id, lane, %algorithm, error = %err, "lane crashed");
                    failures.push(LaneFailure {
                        lane,
                        algorithm,
                        reason: if err.is_panic() {
                            "lane panicked".to_string()
                        } else {
                            err.to_string()
                        },
                    });
                }
            }
        }

        self.enter(RacePhase::Settling);
        failures.sort_by_key(|f| f.lane);
        let finishers = outcomes
            .iter()
            .filter_map(|o| {
                o.finish_order.map(|finish_order| Finisher {
                    algorithm: o.report.algorithm,
                    elapsed_ms: o.report.elapsed_ms,
                    comparisons: o.report.comparisons,
                    swaps: o.report.swaps,
                    finish_order,
                })
            })
            .collect();
        let lanes = outcomes.into_iter().map(|o| o.report).collect();

        let leaderboard = leaderboard::rank(finishers);
        self.enter(RacePhase::Ranked);

        RaceReport {
            race_id,
            started_at,
            input_digest,
            leaderboard,
            lanes,
            failures,
            cancelled: self.token.is_cancelled(),
        }
    }
}

async fn run_lane(
    lane: usize,
    kind: AlgorithmKind,
    mut ctx: RaceRunContext,
    finished: Arc<AtomicUsize>,
) -> LaneOutcome {
    ctx.run_state_mut().restart_clock();
    ctx.render();

    let result = kind.run(&mut ctx).await;
    let elapsed_ms = ctx.run_state().elapsed_ms();

    let (status, finish_order) = match result {
        Ok(()) => {
            let order = finished.fetch_add(1, Ordering::SeqCst);
            ctx.complete();
            (LaneStatus::Finished, Some(order))
        }
        Err(SortError::Cancelled) => {
            ctx.abandon();
            (LaneStatus::Cancelled, None)
        }
        Err(err) => {
            // selectors are resolved before launch, so nothing else reaches here
            tracing::warn!(lane, algorithm = %kind, error = %err, "lane failed");
            ctx.abandon();
            (LaneStatus::Cancelled, None)
        }
    };

    let state = ctx.into_state();
    LaneOutcome {
        report: LaneReport {
            lane,
            algorithm: kind,
            status,
            comparisons: state.comparisons(),
            swaps: state.swaps(),
            elapsed_ms,
            sequence: state.into_sequence(),
        },
        finish_order,
    }
}
