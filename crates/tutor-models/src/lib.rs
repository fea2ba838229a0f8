//! Core data models for the tutor engine.
//!
//! This crate provides the fundamental data types used throughout the
//! engine: exercise sessions, per-student progress, exercise score
//! records and the solution-method/exercise-type vocabulary.

pub mod ids;
pub mod method;
pub mod progress;
pub mod score;
pub mod session;

// Re-export main types
pub use ids::{ExerciseId, UserId};
pub use method::{ExerciseType, Method};
pub use progress::Progress;
pub use score::ExerciseScoreRecord;
pub use session::{ExerciseSession, SessionSnapshot};
