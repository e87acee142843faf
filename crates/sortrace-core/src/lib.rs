//! Sortrace Core: element model, execution contexts and cooperative scheduling
//!
//! Algorithms never touch the outside world directly. They mutate a
//! [`Sequence`] through an [`ExecutionContext`], report comparisons and swaps,
//! and yield at [`ExecutionContext::suspend`], which is also where a
//! cancelled run stops.

pub mod context;
pub mod data_model;
pub mod error;
pub mod observer;
pub mod scheduler;

pub use context::{ExecutionContext, RaceRunContext, RunState, SingleRunContext};
pub use data_model::{Element, Sequence, State};
pub use error::SortError;
pub use observer::{LogObserver, NullObserver, RunObserver};
pub use scheduler::{CancellationToken, Pacer, Pause};

/// Engine version reported by the API
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
