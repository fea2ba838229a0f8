//! Cumulative per-student progress.

use serde::{Deserialize, Serialize};

use crate::method::{ExerciseType, Method};

/// Cumulative counters and error history for one student.
///
/// Created lazily as the all-zero default on first access and updated
/// exactly once per completed exercise by the progress store. Two
/// invariants hold after every update:
///
/// - `total == error_history.len()`
/// - `total` may exceed the sum of the method counters, because a
///   session with an unrecognized method string still counts toward
///   `total` and the history without touching any method bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Exercises completed with the substitution method.
    #[serde(default)]
    pub substitution: u32,

    /// Exercises completed with the elimination method.
    #[serde(default)]
    pub elimination: u32,

    /// Exercises completed with the equalization method.
    #[serde(default)]
    pub equalization: u32,

    /// Suitability exercises completed.
    #[serde(default)]
    pub suitability: u32,

    /// Efficiency exercises completed.
    #[serde(default)]
    pub efficiency: u32,

    /// Matching exercises completed.
    #[serde(default)]
    pub matching: u32,

    /// Total exercises completed.
    #[serde(default)]
    pub total: u32,

    /// Per-exercise error counts, oldest first. Append-only.
    #[serde(default)]
    pub error_history: Vec<u32>,

    /// Exercises completed with a self-explanation.
    #[serde(default)]
    pub self_explanations: u32,

    /// Sessions completed without requesting any hint.
    #[serde(default)]
    pub hint_free_sessions: u32,
}

impl Progress {
    /// Returns the counter for a solution method.
    pub fn method_count(&self, method: Method) -> u32 {
        match method {
            Method::Substitution => self.substitution,
            Method::Elimination => self.elimination,
            Method::Equalization => self.equalization,
        }
    }

    /// Returns the counter for an exercise type.
    pub fn exercise_type_count(&self, exercise_type: ExerciseType) -> u32 {
        match exercise_type {
            ExerciseType::Suitability => self.suitability,
            ExerciseType::Efficiency => self.efficiency,
            ExerciseType::Matching => self.matching,
        }
    }

    /// Number of distinct methods the student has used at least once.
    pub fn methods_used(&self) -> usize {
        Method::ALL
            .iter()
            .filter(|m| self.method_count(**m) > 0)
            .count()
    }

    /// Mean of the full error history, or `None` if there is no history.
    pub fn mean_errors(&self) -> Option<f64> {
        if self.error_history.is_empty() {
            return None;
        }
        let sum: u32 = self.error_history.iter().sum();
        Some(f64::from(sum) / self.error_history.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let progress = Progress::default();
        assert_eq!(progress.total, 0);
        assert_eq!(progress.substitution, 0);
        assert!(progress.error_history.is_empty());
        assert_eq!(progress.hint_free_sessions, 0);
    }

    #[test]
    fn test_methods_used_counts_nonzero_buckets() {
        let progress = Progress {
            substitution: 2,
            equalization: 1,
            ..Progress::default()
        };
        assert_eq!(progress.methods_used(), 2);
    }

    #[test]
    fn test_mean_errors() {
        let progress = Progress {
            error_history: vec![2, 1, 0],
            ..Progress::default()
        };
        assert_eq!(progress.mean_errors(), Some(1.0));
        assert_eq!(Progress::default().mean_errors(), None);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        // Older stored blobs may predate the hint_free_sessions counter.
        let progress: Progress =
            serde_json::from_str(r#"{"total": 3, "error_history": [1, 0, 2]}"#).unwrap();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.hint_free_sessions, 0);
    }
}
