//! Repository traits for per-student engine state.
//!
//! The engine never touches a backend directly; progress, score records
//! and session snapshots all go through these traits so the backing
//! store is a pluggable concern (in-memory map for tests, JSON files
//! for a durable deployment).

use tutor_models::{ExerciseId, ExerciseScoreRecord, Progress, SessionSnapshot, UserId};

use crate::error::Result;

/// Storage for cumulative per-student progress.
pub trait ProgressRepository: Send + Sync {
    /// Loads a student's progress, or `None` if nothing is stored.
    fn load_progress(&self, user_id: &UserId) -> Result<Option<Progress>>;

    /// Stores a student's progress, replacing any previous value.
    fn store_progress(&self, user_id: &UserId, progress: &Progress) -> Result<()>;

    /// Removes a student's stored progress.
    fn clear_progress(&self, user_id: &UserId) -> Result<()>;
}

/// Append-only storage for per-exercise score records.
pub trait ScoreRepository: Send + Sync {
    /// Appends a record to the student's chronological list.
    fn append_score(&self, record: &ExerciseScoreRecord) -> Result<()>;

    /// Returns the student's records, oldest first. Empty if none.
    fn list_scores(&self, user_id: &UserId) -> Result<Vec<ExerciseScoreRecord>>;

    /// Removes all of a student's records. Bulk test-data cleanup only.
    fn clear_scores(&self, user_id: &UserId) -> Result<()>;
}

/// Storage for transient per-exercise session snapshots.
///
/// A snapshot is written once when an exercise completes and consumed
/// once by the feedback pipeline; `take_snapshot` removes it.
pub trait SnapshotRepository: Send + Sync {
    /// Stores a snapshot for a student/exercise pair.
    fn put_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        snapshot: &SessionSnapshot,
    ) -> Result<()>;

    /// Removes and returns the snapshot, if one is stored.
    fn take_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<SessionSnapshot>>;
}
