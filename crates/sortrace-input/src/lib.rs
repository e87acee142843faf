//! Sortrace Input: configuration and sequence construction
//!
//! Everything here runs before a sequence reaches the engine. Validation
//! failures are reported as [`ValidationError`] and never touch an existing
//! sequence.
//!
//! # Example
//!
//! ```
//! use sortrace_input::{parse_custom, ValueRange};
//!
//! let seq = parse_custom("1, 2, 3", ValueRange { min: 10, max: 290 }).unwrap();
//! assert_eq!(seq.values(), vec![10, 150, 290]);
//! ```

pub mod config;
pub mod custom;
pub mod patterns;

pub use config::{RunConfig, ValueRange};
pub use custom::parse_custom;
pub use patterns::{generate, DataPattern};

use thiserror::Error;

/// Malformed configuration or custom input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("INPUT/not a number: `{token}`")]
    NotANumber { token: String },

    #[error("INPUT/too few values: {count} (need at least 3)")]
    TooFew { count: usize },

    #[error("INPUT/too many values: {count} (at most 100)")]
    TooMany { count: usize },

    #[error("INPUT/all values are equal, nothing to scale")]
    ZeroRange,

    #[error("CONFIG/size {0} outside 3..=100")]
    SizeOutOfRange(usize),

    #[error("CONFIG/speed {0} outside 1..=10")]
    SpeedOutOfRange(u8),

    #[error("CONFIG/value range {min}..={max} is empty")]
    InvalidRange { min: u32, max: u32 },

    #[error("CONFIG/unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("CONFIG/yaml: {0}")]
    Yaml(String),
}
