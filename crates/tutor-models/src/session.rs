//! Exercise session types.
//!
//! An [`ExerciseSession`] is the outcome record the exercise UI hands to
//! the engine when a student finishes an exercise. Method and exercise
//! type stay as raw strings here; the progress store parses them through
//! the closed enums so unrecognized values are an explicit branch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one completed exercise.
///
/// Missing or malformed numeric fields deserialize as `0` and the
/// self-explanation flag as `false`; a bad session never breaks the
/// exercise-completion flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// Number of hints the student requested.
    #[serde(default)]
    pub hints: u32,

    /// Number of errors the student made.
    #[serde(default)]
    pub errors: u32,

    /// Solution method, as submitted by the client.
    #[serde(default)]
    pub method: String,

    /// Exercise type, as submitted by the client.
    #[serde(default)]
    pub exercise_type: String,

    /// Whether the student completed the exercise with a self-explanation.
    #[serde(default)]
    pub completed_with_self_explanation: bool,
}

impl ExerciseSession {
    /// Creates a session with the given outcome numbers.
    pub fn new(hints: u32, errors: u32, method: impl Into<String>) -> Self {
        Self {
            hints,
            errors,
            method: method.into(),
            exercise_type: String::new(),
            completed_with_self_explanation: false,
        }
    }

    /// Sets the exercise type.
    pub fn with_exercise_type(mut self, exercise_type: impl Into<String>) -> Self {
        self.exercise_type = exercise_type.into();
        self
    }

    /// Sets the self-explanation flag.
    pub fn with_self_explanation(mut self, flag: bool) -> Self {
        self.completed_with_self_explanation = flag;
        self
    }
}

/// Transient per-exercise snapshot of a session.
///
/// Stashed when an exercise completes and consumed exactly once by the
/// feedback pipeline after the post-exercise ratings come in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The session outcome as it was at completion time.
    pub session: ExerciseSession,

    /// When the exercise completed.
    pub timestamp: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Snapshots a session at the current time.
    pub fn now(session: ExerciseSession) -> Self {
        Self {
            session,
            timestamp: Utc::now(),
        }
    }
}
