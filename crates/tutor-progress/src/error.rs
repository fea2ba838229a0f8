//! Error types for progress tracking.

use thiserror::Error;
use tutor_persistence::PersistenceError;

/// Errors that can occur while updating per-student state.
///
/// Only durable-write failures surface here; read failures degrade to
/// the zero-valued defaults inside the tracker.
#[derive(Error, Debug)]
pub enum ProgressError {
    /// Persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;
