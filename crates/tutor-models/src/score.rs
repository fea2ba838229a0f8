//! Exercise score records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ExerciseId, UserId};
use crate::method::{ExerciseType, Method};
use crate::session::ExerciseSession;

/// One immutable record per completed exercise.
///
/// Appended to a per-student chronological list and never mutated;
/// contributing-exercise selection and goal scoring read these records
/// as evidence for completed goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseScoreRecord {
    /// Identifier of the completed exercise.
    pub exercise_id: ExerciseId,

    /// Student who completed the exercise.
    pub user_id: UserId,

    /// Exercise type, as submitted by the client.
    pub exercise_type: String,

    /// Solution method, as submitted by the client.
    pub method: String,

    /// Hints requested during the exercise.
    pub hints: u32,

    /// Errors made during the exercise.
    pub errors: u32,

    /// Whether the exercise was completed with a self-explanation.
    pub completed_with_self_explanation: bool,

    /// When the record was written; the ordering key for the list.
    pub timestamp: DateTime<Utc>,

    /// Derived score used for goal completion display.
    ///
    /// Currently the raw error count; hints are not factored in.
    pub performance_score: u32,
}

impl ExerciseScoreRecord {
    /// Creates a record from a finished session, stamped with the
    /// current time.
    pub fn from_session(user_id: UserId, exercise_id: ExerciseId, session: &ExerciseSession) -> Self {
        Self {
            exercise_id,
            user_id,
            exercise_type: session.exercise_type.clone(),
            method: session.method.clone(),
            hints: session.hints,
            errors: session.errors,
            completed_with_self_explanation: session.completed_with_self_explanation,
            timestamp: Utc::now(),
            performance_score: session.errors,
        }
    }

    /// Parsed solution method, if the raw string is recognized.
    pub fn parsed_method(&self) -> Option<Method> {
        Method::parse(&self.method)
    }

    /// Parsed exercise type, if the raw string is recognized.
    pub fn parsed_exercise_type(&self) -> Option<ExerciseType> {
        ExerciseType::parse(&self.exercise_type)
    }

    /// True if the exercise was completed without hints or errors.
    pub fn is_flawless(&self) -> bool {
        self.hints == 0 && self.errors == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_score_is_error_count() {
        let session = ExerciseSession::new(3, 2, "elimination");
        let record =
            ExerciseScoreRecord::from_session(UserId::new(), ExerciseId::new(), &session);
        assert_eq!(record.performance_score, 2);
        assert_eq!(record.hints, 3);
    }

    #[test]
    fn test_flawless_requires_zero_hints_and_errors() {
        let session = ExerciseSession::new(0, 0, "substitution");
        let record =
            ExerciseScoreRecord::from_session(UserId::new(), ExerciseId::new(), &session);
        assert!(record.is_flawless());

        let session = ExerciseSession::new(1, 0, "substitution");
        let record =
            ExerciseScoreRecord::from_session(UserId::new(), ExerciseId::new(), &session);
        assert!(!record.is_flawless());
    }

    #[test]
    fn test_parsed_method_uses_legacy_codes() {
        let mut session = ExerciseSession::new(0, 0, "1");
        session.exercise_type = "matching".to_string();
        let record =
            ExerciseScoreRecord::from_session(UserId::new(), ExerciseId::new(), &session);
        assert_eq!(record.parsed_method(), Some(Method::Substitution));
        assert_eq!(
            record.parsed_exercise_type(),
            Some(ExerciseType::Matching)
        );
    }
}
