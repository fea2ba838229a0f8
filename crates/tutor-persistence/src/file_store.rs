//! JSON file-backed repositories.

use std::fs;
use std::path::PathBuf;

use tutor_models::{ExerciseId, ExerciseScoreRecord, Progress, SessionSnapshot, UserId};

use crate::atomic::{atomic_write_json, read_json};
use crate::error::{PersistenceError, Result};
use crate::repository::{ProgressRepository, ScoreRepository, SnapshotRepository};

/// File-backed store for all per-student engine state.
///
/// State is stored as JSON files namespaced by student id:
/// ```text
/// base_path/
/// ├── progress/
/// │   └── {user_id}.json
/// ├── scores/
/// │   └── {user_id}.json
/// └── snapshots/
///     └── {user_id}/
///         └── {exercise_id}.json
/// ```
///
/// All writes are atomic (temp file + rename). Missing files read as
/// "no data".
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a new FileStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn progress_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path
            .join("progress")
            .join(format!("{}.json", user_id))
    }

    fn scores_path(&self, user_id: &UserId) -> PathBuf {
        self.base_path
            .join("scores")
            .join(format!("{}.json", user_id))
    }

    fn snapshot_path(&self, user_id: &UserId, exercise_id: &ExerciseId) -> PathBuf {
        self.base_path
            .join("snapshots")
            .join(user_id.as_str())
            .join(format!("{}.json", exercise_id))
    }

    fn remove_if_exists(path: &PathBuf) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).map_err(|source| PersistenceError::WriteError {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl ProgressRepository for FileStore {
    fn load_progress(&self, user_id: &UserId) -> Result<Option<Progress>> {
        let path = self.progress_path(user_id);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn store_progress(&self, user_id: &UserId, progress: &Progress) -> Result<()> {
        atomic_write_json(&self.progress_path(user_id), progress)
    }

    fn clear_progress(&self, user_id: &UserId) -> Result<()> {
        Self::remove_if_exists(&self.progress_path(user_id))
    }
}

impl ScoreRepository for FileStore {
    fn append_score(&self, record: &ExerciseScoreRecord) -> Result<()> {
        let path = self.scores_path(&record.user_id);
        let mut records: Vec<ExerciseScoreRecord> = if path.exists() {
            read_json(&path)?
        } else {
            Vec::new()
        };
        records.push(record.clone());
        atomic_write_json(&path, &records)
    }

    fn list_scores(&self, user_id: &UserId) -> Result<Vec<ExerciseScoreRecord>> {
        let path = self.scores_path(user_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }

    fn clear_scores(&self, user_id: &UserId) -> Result<()> {
        Self::remove_if_exists(&self.scores_path(user_id))
    }
}

impl SnapshotRepository for FileStore {
    fn put_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        snapshot: &SessionSnapshot,
    ) -> Result<()> {
        atomic_write_json(&self.snapshot_path(user_id, exercise_id), snapshot)
    }

    fn take_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<SessionSnapshot>> {
        let path = self.snapshot_path(user_id, exercise_id);
        if !path.exists() {
            return Ok(None);
        }
        let snapshot = read_json(&path)?;
        Self::remove_if_exists(&path)?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tutor_models::ExerciseSession;

    fn make_record(user: &UserId, errors: u32) -> ExerciseScoreRecord {
        let session = ExerciseSession::new(0, errors, "substitution");
        ExerciseScoreRecord::from_session(user.clone(), ExerciseId::new(), &session)
    }

    #[test]
    fn test_progress_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let user = UserId::from_string("user-1");

        assert!(store.load_progress(&user).unwrap().is_none());

        let progress = Progress {
            total: 2,
            error_history: vec![1, 0],
            ..Progress::default()
        };
        store.store_progress(&user, &progress).unwrap();
        assert_eq!(store.load_progress(&user).unwrap(), Some(progress));

        store.clear_progress(&user).unwrap();
        assert!(store.load_progress(&user).unwrap().is_none());
    }

    #[test]
    fn test_scores_append_preserves_order() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let user = UserId::from_string("user-1");

        for errors in [3, 1, 0] {
            store.append_score(&make_record(&user, errors)).unwrap();
        }

        let listed = store.list_scores(&user).unwrap();
        let errors: Vec<u32> = listed.iter().map(|r| r.errors).collect();
        assert_eq!(errors, vec![3, 1, 0]);
    }

    #[test]
    fn test_scores_isolated_per_user() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let alice = UserId::from_string("user-alice");
        let bob = UserId::from_string("user-bob");

        store.append_score(&make_record(&alice, 1)).unwrap();
        assert!(store.list_scores(&bob).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_is_taken_once() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let user = UserId::from_string("user-1");
        let exercise = ExerciseId::from_string("ex-1");

        let snapshot = SessionSnapshot::now(ExerciseSession::new(1, 2, "elimination"));
        store.put_snapshot(&user, &exercise, &snapshot).unwrap();

        let taken = store.take_snapshot(&user, &exercise).unwrap();
        assert_eq!(taken, Some(snapshot));

        // Consumed: a second take finds nothing.
        assert!(store.take_snapshot(&user, &exercise).unwrap().is_none());
    }
}
