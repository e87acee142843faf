//! Observer: the callback surface a presentation layer implements.
//!
//! Every method has a no-op default so a collaborator only overrides what it
//! draws. `NullObserver` is the all-defaults implementation.

use crate::data_model::Sequence;
use std::time::Duration;

pub trait RunObserver: Send + Sync {
    /// Called after every state-visible change. `algorithm` is set in race
    /// mode so the collaborator can pick the right lane.
    fn render(&self, _algorithm: Option<&str>, _sequence: &Sequence) {}

    /// Single-run counters.
    fn update_counters(&self, _comparisons: u64, _swaps: u64, _elapsed_ms: u64) {}

    /// Per-algorithm counters in race mode.
    fn update_race_counters(
        &self,
        _algorithm: &str,
        _comparisons: u64,
        _swaps: u64,
        _elapsed_ms: u64,
    ) {
    }

    /// 0-100, non-decreasing within a run.
    fn update_progress(&self, _algorithm: Option<&str>, _percentage: u8) {}

    /// Fire-and-forget tone. Errors are swallowed by the caller.
    fn chime(&self, _frequency_hz: f64, _duration: Option<Duration>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {}

/// Forwards counters and progress to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn render(&self, algorithm: Option<&str>, sequence: &Sequence) {
        tracing::trace!(algorithm = algorithm.unwrap_or("single"), len = sequence.len(), "render");
    }

    fn update_counters(&self, comparisons: u64, swaps: u64, elapsed_ms: u64) {
        tracing::trace!(comparisons, swaps, elapsed_ms, "counters");
    }

    fn update_race_counters(&self, algorithm: &str, comparisons: u64, swaps: u64, elapsed_ms: u64) {
        tracing::trace!(algorithm, comparisons, swaps, elapsed_ms, "race counters");
    }

    fn update_progress(&self, algorithm: Option<&str>, percentage: u8) {
        tracing::debug!(algorithm = algorithm.unwrap_or("single"), percentage, "progress");
    }
}
