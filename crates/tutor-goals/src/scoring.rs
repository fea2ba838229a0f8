//! Contributing-exercise selection and goal score calculation.

use std::collections::HashMap;

use tracing::warn;
use tutor_models::{ExerciseScoreRecord, Method};

use crate::catalog::find_goal;

/// Predicate over one exercise record.
pub type RecordPredicate = fn(&ExerciseScoreRecord) -> bool;

/// Rule selecting the exercise records that justify a goal's completion.
///
/// All rules read the record list oldest-first and return the selection
/// in chronological order.
#[derive(Clone, Copy)]
pub enum SelectionRule {
    /// The single most recent record matching the predicate.
    MostRecentMatching(RecordPredicate),
    /// The first `n` records matching the predicate.
    FirstMatching { n: usize, pred: RecordPredicate },
    /// The first record of each distinct method, until `distinct`
    /// methods are represented.
    FirstPerDistinctMethod { distinct: usize },
    /// The first `n` records of whichever method first accumulates `n`
    /// records.
    FirstMethodToReach { n: usize },
    /// The first `n` records, any method.
    FirstN(usize),
    /// The last `n` records, any method.
    LastN(usize),
    /// Every record.
    All,
}

impl SelectionRule {
    /// Applies the rule to a chronologically sorted record list.
    pub fn select(&self, records: &[ExerciseScoreRecord]) -> Vec<ExerciseScoreRecord> {
        match *self {
            Self::MostRecentMatching(pred) => records
                .iter()
                .rev()
                .find(|r| pred(r))
                .cloned()
                .into_iter()
                .collect(),
            Self::FirstMatching { n, pred } => {
                records.iter().filter(|r| pred(r)).take(n).cloned().collect()
            }
            Self::FirstPerDistinctMethod { distinct } => {
                let mut seen: Vec<Method> = Vec::new();
                let mut selected = Vec::new();
                for record in records {
                    if seen.len() == distinct {
                        break;
                    }
                    if let Some(method) = record.parsed_method() {
                        if !seen.contains(&method) {
                            seen.push(method);
                            selected.push(record.clone());
                        }
                    }
                }
                selected
            }
            Self::FirstMethodToReach { n } => {
                let mut by_method: HashMap<Method, Vec<&ExerciseScoreRecord>> = HashMap::new();
                for record in records {
                    if let Some(method) = record.parsed_method() {
                        let bucket = by_method.entry(method).or_default();
                        bucket.push(record);
                        if bucket.len() == n {
                            return bucket.iter().map(|r| (*r).clone()).collect();
                        }
                    }
                }
                Vec::new()
            }
            Self::FirstN(n) => records.iter().take(n).cloned().collect(),
            Self::LastN(n) => {
                let start = records.len().saturating_sub(n);
                records[start..].to_vec()
            }
            Self::All => records.to_vec(),
        }
    }
}

/// Strategy aggregating contributing records into one mistake count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// The one contributing record's score.
    Single,
    /// Rounded mean of the contributing scores.
    Average,
    /// Rounded mean weighted by recency: record *i* (1-indexed, oldest
    /// first) weighs *i*, so later exercises dominate.
    WeightedByRecency,
}

/// Result of scoring a completed goal.
#[derive(Debug, Clone)]
pub struct GoalScore {
    /// Goal title the score belongs to.
    pub title: String,
    /// Aggregated mistake count shown to the student.
    pub final_score: u32,
    /// Strategy that produced the score.
    pub strategy: ScoringStrategy,
    /// The records the score was computed from, oldest first.
    pub contributing: Vec<ExerciseScoreRecord>,
}

impl GoalScore {
    /// True when at least one exercise record backs the score.
    ///
    /// An empty selection scores 0, which is indistinguishable from a
    /// flawless run by the number alone; consumers that care can check
    /// this instead.
    pub fn has_data(&self) -> bool {
        !self.contributing.is_empty()
    }
}

/// Returns the records justifying the goal's completion, oldest first.
///
/// The input list is re-sorted by timestamp before the rule is applied.
/// Unknown titles select nothing (logged, not an error).
pub fn get_contributing_exercises(
    title: &str,
    records: &[ExerciseScoreRecord],
) -> Vec<ExerciseScoreRecord> {
    let Some(goal) = find_goal(title) else {
        warn!(goal = title, "no selection rule for goal title");
        return Vec::new();
    };
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.timestamp);
    goal.selection.select(&sorted)
}

/// Computes the final score for a completed goal from the full record
/// list.
///
/// An empty selection yields a score of 0 (see [`GoalScore::has_data`]).
pub fn calculate_goal_score(title: &str, records: &[ExerciseScoreRecord]) -> GoalScore {
    let contributing = get_contributing_exercises(title, records);
    let strategy = find_goal(title)
        .map(|g| g.scoring)
        .unwrap_or(ScoringStrategy::Single);
    let final_score = aggregate(strategy, &contributing);
    GoalScore {
        title: title.to_string(),
        final_score,
        strategy,
        contributing,
    }
}

fn aggregate(strategy: ScoringStrategy, contributing: &[ExerciseScoreRecord]) -> u32 {
    if contributing.is_empty() {
        return 0;
    }
    match strategy {
        ScoringStrategy::Single => contributing
            .last()
            .map(|r| r.performance_score)
            .unwrap_or(0),
        ScoringStrategy::Average => {
            let sum: u32 = contributing.iter().map(|r| r.performance_score).sum();
            (f64::from(sum) / contributing.len() as f64).round() as u32
        }
        ScoringStrategy::WeightedByRecency => {
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            for (i, record) in contributing.iter().enumerate() {
                let weight = (i + 1) as f64;
                weighted_sum += weight * f64::from(record.performance_score);
                weight_total += weight;
            }
            (weighted_sum / weight_total).round() as u32
        }
    }
}
