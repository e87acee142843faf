//! Sortrace Algorithms: instrumented reference sorts
//!
//! Each algorithm is written once against [`ExecutionContext`] and behaves
//! the same whether it runs alone or as one lane of a race. Comparison and
//! swap counts depend only on the input's value order, so two runs over the
//! same input always agree.
//!
//! ```text
//! AlgorithmKind::run(ctx)
//!   ├─ record_comparison / record_swap   → counters
//!   ├─ set_state / render                → presentation
//!   └─ suspend                           → pacing, cancellation
//! ```

pub mod bubble;
pub mod catalog;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

pub use catalog::{catalog, AlgorithmInfo};

use serde::{Deserialize, Serialize};
use sortrace_core::{ExecutionContext, SortError};
use std::fmt;
use std::str::FromStr;

/// Algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::Bubble,
        AlgorithmKind::Selection,
        AlgorithmKind::Insertion,
        AlgorithmKind::Merge,
        AlgorithmKind::Quick,
        AlgorithmKind::Heap,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "bubble",
            AlgorithmKind::Selection => "selection",
            AlgorithmKind::Insertion => "insertion",
            AlgorithmKind::Merge => "merge",
            AlgorithmKind::Quick => "quick",
            AlgorithmKind::Heap => "heap",
        }
    }

    pub fn info(self) -> &'static AlgorithmInfo {
        catalog::info(self)
    }

    /// Run the algorithm to completion or until the context is cancelled.
    pub async fn run<C: ExecutionContext>(self, ctx: &mut C) -> Result<(), SortError> {
        match self {
            AlgorithmKind::Bubble => bubble::sort(ctx).await,
            AlgorithmKind::Selection => selection::sort(ctx).await,
            AlgorithmKind::Insertion => insertion::sort(ctx).await,
            AlgorithmKind::Merge => merge::sort(ctx).await,
            AlgorithmKind::Quick => quick::sort(ctx).await,
            AlgorithmKind::Heap => heap::sort(ctx).await,
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
