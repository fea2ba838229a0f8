//! Progress accumulation for the tutor engine.
//!
//! [`ProgressTracker`] is the single writer of per-student state: it
//! applies each completed exercise to the cumulative [`Progress`]
//! counters, appends to the exercise score log and manages the
//! transient session snapshot consumed by the feedback pipeline.
//!
//! [`Progress`]: tutor_models::Progress

pub mod error;
pub mod tracker;

pub use error::{ProgressError, Result};
pub use tracker::ProgressTracker;
