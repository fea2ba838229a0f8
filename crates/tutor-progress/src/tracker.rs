//! ProgressTracker - the single writer of per-student engine state.

use std::path::Path;

use tracing::{debug, warn};
use tutor_models::{
    ExerciseId, ExerciseScoreRecord, ExerciseSession, ExerciseType, Method, Progress,
    SessionSnapshot, UserId,
};
use tutor_persistence::{
    FileStore, MemoryStore, ProgressRepository, ScoreRepository, SnapshotRepository,
};

use crate::error::Result;

/// Applies completed exercises to a student's cumulative progress and
/// score log.
///
/// Generic over the backing store; [`ProgressTracker::in_memory`] and
/// [`ProgressTracker::on_disk`] cover the two provided backends.
///
/// Reads never fail: a missing or unreadable stored value degrades to
/// the zero-valued default (logged, not surfaced), because these paths
/// run inside UI event handlers where an error would break the exercise
/// flow. Writes return [`ProgressError`](crate::ProgressError).
///
/// Updates are not idempotent; the host must deliver each exercise
/// completion at most once.
pub struct ProgressTracker<S> {
    store: S,
}

impl ProgressTracker<MemoryStore> {
    /// Creates a tracker over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl ProgressTracker<FileStore> {
    /// Creates a tracker over a JSON file store rooted at `base_path`.
    pub fn on_disk(base_path: impl AsRef<Path>) -> Self {
        Self::new(FileStore::new(base_path.as_ref()))
    }
}

impl<S> ProgressTracker<S>
where
    S: ProgressRepository + ScoreRepository + SnapshotRepository,
{
    /// Creates a tracker over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the student's progress, or the zero-valued default.
    pub fn get_progress(&self, user_id: &UserId) -> Progress {
        match self.store.load_progress(user_id) {
            Ok(Some(progress)) => progress,
            Ok(None) => Progress::default(),
            Err(err) => {
                warn!(user = %user_id, error = %err, "failed to load progress, using default");
                Progress::default()
            }
        }
    }

    /// Applies one completed exercise to the student's progress.
    ///
    /// Exactly one method counter and one exercise-type counter are
    /// incremented when the raw strings parse; unrecognized values
    /// leave the counters alone but still advance `total` and the
    /// error history. Persists and returns the new state.
    pub fn update_progress(
        &self,
        user_id: &UserId,
        session: &ExerciseSession,
    ) -> Result<Progress> {
        let mut progress = self.get_progress(user_id);

        match Method::parse(&session.method) {
            Some(Method::Substitution) => progress.substitution += 1,
            Some(Method::Elimination) => progress.elimination += 1,
            Some(Method::Equalization) => progress.equalization += 1,
            None => {
                warn!(user = %user_id, method = %session.method, "unrecognized method, counting toward total only");
            }
        }

        match ExerciseType::parse(&session.exercise_type) {
            Some(ExerciseType::Suitability) => progress.suitability += 1,
            Some(ExerciseType::Efficiency) => progress.efficiency += 1,
            Some(ExerciseType::Matching) => progress.matching += 1,
            None => {}
        }

        progress.total += 1;
        progress.error_history.push(session.errors);
        if session.completed_with_self_explanation {
            progress.self_explanations += 1;
        }
        if session.hints == 0 {
            progress.hint_free_sessions += 1;
        }

        self.store.store_progress(user_id, &progress)?;
        debug!(user = %user_id, total = progress.total, "progress updated");
        Ok(progress)
    }

    /// Clears the student's progress to the zero state.
    ///
    /// Test/demo reset only; not part of the normal student flow.
    pub fn reset_progress(&self, user_id: &UserId) -> Result<()> {
        self.store.clear_progress(user_id)?;
        Ok(())
    }

    /// Appends an exercise score record to the student's log.
    pub fn save_exercise_score(&self, record: &ExerciseScoreRecord) -> Result<()> {
        self.store.append_score(record)?;
        debug!(user = %record.user_id, exercise = %record.exercise_id, "score record saved");
        Ok(())
    }

    /// Returns the student's score records, oldest first.
    ///
    /// Empty on any read failure (logged).
    pub fn get_exercise_scores(&self, user_id: &UserId) -> Vec<ExerciseScoreRecord> {
        match self.store.list_scores(user_id) {
            Ok(records) => records,
            Err(err) => {
                warn!(user = %user_id, error = %err, "failed to list score records");
                Vec::new()
            }
        }
    }

    /// Removes all of the student's score records (test-data cleanup).
    pub fn clear_exercise_scores(&self, user_id: &UserId) -> Result<()> {
        self.store.clear_scores(user_id)?;
        Ok(())
    }

    /// Stashes a session snapshot for later feedback generation.
    pub fn stash_session(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        session: ExerciseSession,
    ) -> Result<()> {
        let snapshot = SessionSnapshot::now(session);
        self.store.put_snapshot(user_id, exercise_id, &snapshot)?;
        Ok(())
    }

    /// Removes and returns the stashed snapshot, if any.
    pub fn take_session(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
    ) -> Option<SessionSnapshot> {
        match self.store.take_snapshot(user_id, exercise_id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(user = %user_id, error = %err, "failed to take session snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session(hints: u32, errors: u32, method: &str) -> ExerciseSession {
        ExerciseSession::new(hints, errors, method).with_exercise_type("efficiency")
    }

    #[test]
    fn test_fresh_user_gets_zero_progress() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        let progress = tracker.get_progress(&user);
        assert_eq!(progress, Progress::default());
        // No side effect: still nothing stored.
        assert_eq!(tracker.get_progress(&user), Progress::default());
    }

    #[test]
    fn test_update_advances_total_and_history_together() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        let before = tracker.get_progress(&user);
        let after = tracker.update_progress(&user, &session(1, 2, "substitution")).unwrap();

        assert_eq!(after.total, before.total + 1);
        assert_eq!(after.error_history.len(), before.error_history.len() + 1);
        assert_eq!(after.error_history.last(), Some(&2));
        assert_eq!(after.substitution, 1);
        assert_eq!(after.efficiency, 1);
    }

    #[test]
    fn test_unrecognized_method_counts_toward_total_only() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        let after = tracker.update_progress(&user, &session(0, 1, "cramer")).unwrap();

        assert_eq!(after.total, 1);
        assert_eq!(after.error_history, vec![1]);
        assert_eq!(after.substitution + after.elimination + after.equalization, 0);
    }

    #[test]
    fn test_legacy_numeric_method_codes() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        tracker.update_progress(&user, &session(0, 0, "0")).unwrap();
        tracker.update_progress(&user, &session(0, 0, "1")).unwrap();
        let after = tracker.update_progress(&user, &session(0, 0, "2")).unwrap();

        assert_eq!(after.equalization, 1);
        assert_eq!(after.substitution, 1);
        assert_eq!(after.elimination, 1);
    }

    #[test]
    fn test_self_explanation_and_hint_free_counters() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        let s = session(0, 0, "elimination").with_self_explanation(true);
        tracker.update_progress(&user, &s).unwrap();
        let after = tracker.update_progress(&user, &session(2, 0, "elimination")).unwrap();

        assert_eq!(after.self_explanations, 1);
        // Only the zero-hint session bumps the hint-free counter.
        assert_eq!(after.hint_free_sessions, 1);
    }

    #[test]
    fn test_reset_returns_to_zero_state() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        tracker.update_progress(&user, &session(0, 3, "substitution")).unwrap();
        tracker.reset_progress(&user).unwrap();
        assert_eq!(tracker.get_progress(&user), Progress::default());
    }

    #[test]
    fn test_score_roundtrip() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");

        let record = ExerciseScoreRecord::from_session(
            user.clone(),
            ExerciseId::from_string("ex-1"),
            &session(1, 2, "substitution"),
        );
        tracker.save_exercise_score(&record).unwrap();

        let listed = tracker.get_exercise_scores(&user);
        assert_eq!(listed, vec![record]);
    }

    #[test]
    fn test_on_disk_tracker_persists_across_instances() {
        let dir = tempdir().unwrap();
        let user = UserId::from_string("user-1");

        {
            let tracker = ProgressTracker::on_disk(dir.path());
            tracker.update_progress(&user, &session(0, 1, "equalization")).unwrap();
        }

        let tracker = ProgressTracker::on_disk(dir.path());
        let progress = tracker.get_progress(&user);
        assert_eq!(progress.total, 1);
        assert_eq!(progress.equalization, 1);
    }

    #[test]
    fn test_session_snapshot_consumed_once() {
        let tracker = ProgressTracker::in_memory();
        let user = UserId::from_string("user-1");
        let exercise = ExerciseId::from_string("ex-1");

        tracker
            .stash_session(&user, &exercise, session(1, 0, "substitution"))
            .unwrap();
        assert!(tracker.take_session(&user, &exercise).is_some());
        assert!(tracker.take_session(&user, &exercise).is_none());
    }
}
