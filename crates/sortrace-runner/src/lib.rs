//! Sortrace Runner: single runs, races and the session that owns them
//!
//! A [`Session`] holds the current sequence and configuration. It hands a
//! fresh copy of that sequence to every run, so a single run and every race
//! lane always start from identical input.
//!
//! # Example
//!
//! ```ignore
//! use sortrace_runner::Session;
//! use sortrace_input::RunConfig;
//! use sortrace_core::LogObserver;
//! use std::sync::Arc;
//!
//! let mut session = Session::new(RunConfig::default(), Arc::new(LogObserver))?;
//! let report = session.race(&["bubble", "quick", "heap"]).await?;
//! if let Some(winner) = report.winner() {
//!     println!("{} won in {} ms", winner.algorithm(), winner.elapsed_ms());
//! }
//! ```

pub mod leaderboard;
pub mod race;
pub mod session;
pub mod single;

pub use leaderboard::{rank, Finisher, RunResult};
pub use race::{LaneFailure, LaneReport, LaneStatus, RaceOrchestrator, RacePhase, RaceReport};
pub use session::{Session, StopHandle};
pub use single::{run_single, RunStatus, RunSummary};

use sortrace_core::SortError;
use sortrace_input::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("RUN/busy: another run is in progress")]
    Busy,

    #[error("RACE/no algorithms selected")]
    EmptyRace,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sort(#[from] SortError),
}

impl RunnerError {
    /// True for errors caused by the caller's input rather than engine state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RunnerError::EmptyRace
                | RunnerError::Validation(_)
                | RunnerError::Sort(SortError::UnknownAlgorithm(_))
        )
    }
}
