//! GoalEngine - store-backed entry points for the app layer.
//!
//! Wires the pure evaluator and scorer to a [`ProgressTracker`] so the
//! UI layer can work in terms of user ids. Runs synchronously inside
//! the exercise-completion handler; nothing here blocks beyond the
//! store write.

use tutor_models::{ExerciseId, ExerciseScoreRecord, ExerciseSession, UserId};
use tutor_persistence::{ProgressRepository, ScoreRepository, SnapshotRepository};
use tutor_progress::{ProgressTracker, Result};

use crate::evaluator::{check_goal_satisfied, check_progressive_goals};
use crate::scoring::{calculate_goal_score, GoalScore};

/// Store-backed goal engine.
pub struct GoalEngine<'a, S> {
    tracker: &'a ProgressTracker<S>,
}

impl<'a, S> GoalEngine<'a, S>
where
    S: ProgressRepository + ScoreRepository + SnapshotRepository,
{
    /// Creates an engine over an existing tracker.
    pub fn new(tracker: &'a ProgressTracker<S>) -> Self {
        Self { tracker }
    }

    /// Applies a completed exercise and returns the satisfied goals.
    ///
    /// Updates progress, appends the score record and sweeps the goal
    /// catalog against the fresh state, in that order. Returned titles
    /// are in catalog order; the caller deduplicates against goals the
    /// student already completed and decides display sequencing.
    pub fn complete_exercise(
        &self,
        user_id: &UserId,
        exercise_id: &ExerciseId,
        session: &ExerciseSession,
    ) -> Result<Vec<&'static str>> {
        let progress = self.tracker.update_progress(user_id, session)?;
        let record =
            ExerciseScoreRecord::from_session(user_id.clone(), exercise_id.clone(), session);
        self.tracker.save_exercise_score(&record)?;
        Ok(check_progressive_goals(&progress, session))
    }

    /// Sweeps the catalog against current progress for a session,
    /// without writing anything.
    pub fn check_progressive_goals(
        &self,
        user_id: &UserId,
        session: &ExerciseSession,
    ) -> Vec<&'static str> {
        let progress = self.tracker.get_progress(user_id);
        check_progressive_goals(&progress, session)
    }

    /// Standing re-check of one named goal from stored progress.
    pub fn check_goal_condition_satisfied(&self, title: &str, user_id: &UserId) -> bool {
        let progress = self.tracker.get_progress(user_id);
        check_goal_satisfied(title, &progress, None)
    }

    /// Scores a completed goal from the student's full score history.
    pub fn calculate_goal_score(&self, title: &str, user_id: &UserId) -> GoalScore {
        let records = self.tracker.get_exercise_scores(user_id);
        calculate_goal_score(title, &records)
    }
}
