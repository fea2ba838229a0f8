//! In-memory repositories for tests and embedded use.

use std::collections::HashMap;
use std::sync::RwLock;

use tutor_models::{ExerciseId, ExerciseScoreRecord, Progress, SessionSnapshot, UserId};

use crate::error::{PersistenceError, Result};
use crate::repository::{ProgressRepository, ScoreRepository, SnapshotRepository};

/// In-memory store for all per-student engine state.
///
/// Backed by `RwLock<HashMap>` maps so it can be shared behind an `Arc`
/// across threads; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    progress: RwLock<HashMap<UserId, Progress>>,
    scores: RwLock<HashMap<UserId, Vec<ExerciseScoreRecord>>>,
    snapshots: RwLock<HashMap<(UserId, ExerciseId), SessionSnapshot>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(what: &str) -> PersistenceError {
        PersistenceError::LockPoisoned(what.to_string())
    }
}

impl ProgressRepository for MemoryStore {
    fn load_progress(&self, user_id: &UserId) -> Result<Option<Progress>> {
        let map = self
            .progress
            .read()
            .map_err(|_| Self::poisoned("progress"))?;
        Ok(map.get(user_id).cloned())
    }

    fn store_progress(&self, user_id: &UserId, progress: &Progress) -> Result<()> {
        let mut map = self
            .progress
            .write()
            .map_err(|_| Self::poisoned("progress"))?;
        map.insert(user_id.clone(), progress.clone());
        Ok(())
    }

    fn clear_progress(&self, user_id: &UserId) -> Result<()> {
        let mut map = self
            .progress
            .write()
            .map_err(|_| Self::poisoned("progress"))?;
        map.remove(user_id);
        Ok(())
    }
}

impl ScoreRepository for MemoryStore {
    fn append_score(&self, record: &ExerciseScoreRecord) -> Result<()> {
        let mut map = self.scores.write().map_err(|_| Self::poisoned("scores"))?;
        map.entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn list_scores(&self, user_id: &UserId) -> Result<Vec<ExerciseScoreRecord>> {
        let map = self.scores.read().map_err(|_| Self::poisoned("scores"))?;
        Ok(map.get(user_id).cloned().unwrap_or_default())
    }

    fn clear_scores(&self, user_id: &UserId) -> Result<()> {
        let mut map = self.scores.write().map_err(|_| Self::poisoned("scores"))?;
        map.remove(user_id);
        Ok(())
    }
}

impl SnapshotRepository for MemoryStore {
    fn put_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        snapshot: &SessionSnapshot,
    ) -> Result<()> {
        let mut map = self
            .snapshots
            .write()
            .map_err(|_| Self::poisoned("snapshots"))?;
        map.insert((user_id.clone(), exercise_id.clone()), snapshot.clone());
        Ok(())
    }

    fn take_snapshot(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<SessionSnapshot>> {
        let mut map = self
            .snapshots
            .write()
            .map_err(|_| Self::poisoned("snapshots"))?;
        Ok(map.remove(&(user_id.clone(), exercise_id.clone())))
    }
}
