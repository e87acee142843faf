//! Leaderboard: ranks finished race lanes
//!
//! Ascending by elapsed milliseconds; equal times go to whichever lane
//! reported completion first.

use serde::Serialize;
use sortrace_algorithms::AlgorithmKind;

/// A lane that finished normally, before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finisher {
    pub algorithm: AlgorithmKind,
    pub elapsed_ms: u64,
    pub comparisons: u64,
    pub swaps: u64,
    /// 0 for the first lane to complete, 1 for the next, ...
    pub finish_order: usize,
}

/// One leaderboard row. Only [`rank`] creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    algorithm: AlgorithmKind,
    elapsed_ms: u64,
    comparisons: u64,
    swaps: u64,
    rank: usize,
}

impl RunResult {
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// 1-based
    pub fn rank(&self) -> usize {
        self.rank
    }
}

pub fn rank(mut finishers: Vec<Finisher>) -> Vec<RunResult> {
    finishers.sort_by_key(|f| (f.elapsed_ms, f.finish_order));
    finishers
        .into_iter()
        .enumerate()
        .map(|(i, f)| RunResult {
            algorithm: f.algorithm,
            elapsed_ms: f.elapsed_ms,
            comparisons: f.comparisons,
            swaps: f.swaps,
            rank: i + 1,
        })
        .collect()
}
