//! Cooperative Scheduler: cancellation token and paced suspension
//!
//! `suspend` is the only point where a run hands control back to the host
//! runtime. Everything an algorithm does between two suspensions is atomic
//! with respect to other runs.

use crate::error::SortError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared "is running" flag. Clones observe the same flag, so one `cancel`
/// stops every context built from the same session token.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with `Cancelled` once the token has been tripped.
    pub fn check(&self) -> Result<(), SortError> {
        if self.is_cancelled() {
            Err(SortError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Duration hint passed to `suspend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Regular step, scaled by the speed factor
    Step,
    /// Short highlight before an adjacent exchange
    Brief,
    /// Longer highlight before a long-distance exchange
    Long,
    /// Explicit duration
    Exact(Duration),
}

/// Maps pause hints to wall-clock waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    speed: u8,
    unit: Duration,
}

impl Pacer {
    pub const MIN_SPEED: u8 = 1;
    pub const MAX_SPEED: u8 = 10;

    /// `speed` is clamped to 1..=10; higher is faster.
    pub fn new(speed: u8, unit: Duration) -> Self {
        Self {
            speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED),
            unit,
        }
    }

    /// A pacer that never waits on the clock and only yields.
    pub fn unpaced() -> Self {
        Self::new(Self::MAX_SPEED, Duration::ZERO)
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn delay_for(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Step => self.unit * u32::from(Self::MAX_SPEED + 1 - self.speed),
            Pause::Brief => self.unit * 5,
            Pause::Long => self.unit * 10,
            Pause::Exact(duration) => duration,
        }
    }

    /// Check the token, then wait. The returned future owns everything it
    /// needs so contexts can hand it out without borrowing themselves.
    pub fn suspend(
        &self,
        token: &CancellationToken,
        pause: Pause,
    ) -> impl std::future::Future<Output = Result<(), SortError>> + Send + 'static {
        let token = token.clone();
        let delay = self.delay_for(pause);
        async move {
            token.check()?;
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }
            Ok(())
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(10))
    }
}
