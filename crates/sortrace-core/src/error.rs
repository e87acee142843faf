//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The run's cancellation token was tripped before a suspension point.
    #[error("RUN/cancelled")]
    Cancelled,

    #[error("ALGO/unknown: {0}")]
    UnknownAlgorithm(String),
}

impl SortError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SortError::Cancelled)
    }
}
