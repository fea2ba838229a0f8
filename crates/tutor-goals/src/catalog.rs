//! The static goal catalog.
//!
//! Goal definitions are compiled in, not user-configurable: ~two dozen
//! entries across four categories, each carrying its completion
//! predicate, contributing-exercise selection rule and scoring
//! strategy. Thresholds in the predicates are contract; changing one
//! changes which goals students are credited with.

use serde::{Deserialize, Serialize};
use tutor_models::{ExerciseSession, Method, Progress};

use crate::scoring::{ScoringStrategy, SelectionRule};

/// Category a goal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// Foundational concepts and first contact with each method.
    BasicUnderstanding,
    /// Fluency with the three solution methods.
    MethodMastery,
    /// Accuracy and independence while solving.
    ProblemSolving,
    /// Reflection, resilience and long-term habits.
    LearningGrowth,
}

/// Difficulty band of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Inputs a goal predicate can look at.
///
/// `session` is the exercise that just completed; standing re-checks
/// (no fresh session) pass `None`, and predicates that need a session
/// treat its absence as "not satisfied" unless the goal can be
/// reconstructed from progress alone.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// Progress as of after the triggering update.
    pub progress: &'a Progress,
    /// The just-completed session, when evaluating on completion.
    pub session: Option<&'a ExerciseSession>,
}

/// Predicate deciding whether a goal's completion condition holds.
pub type Condition = for<'a, 'b> fn(&'a EvalContext<'b>) -> bool;

/// One entry in the goal catalog.
pub struct GoalDef {
    /// Unique display title; the lookup key everywhere.
    pub title: &'static str,
    pub category: GoalCategory,
    pub difficulty: GoalDifficulty,
    /// Completion condition. Never panics; absent data reads as zero.
    pub condition: Condition,
    /// Which exercise records justify this goal's completion.
    pub selection: SelectionRule,
    /// How the selected records aggregate into the displayed score.
    pub scoring: ScoringStrategy,
}

fn session_hints(ctx: &EvalContext) -> Option<u32> {
    ctx.session.map(|s| s.hints)
}

fn session_errors(ctx: &EvalContext) -> Option<u32> {
    ctx.session.map(|s| s.errors)
}

/// Mean of the last `n` history entries vs. the mean of everything
/// before them. False when there are no earlier entries to compare to.
fn recent_mean_below_earlier(history: &[u32], n: usize) -> bool {
    if history.len() <= n {
        return false;
    }
    let (earlier, recent) = history.split_at(history.len() - n);
    mean(recent) < mean(earlier)
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().sum();
    f64::from(sum) / values.len() as f64
}

/// Last `n` history entries strictly decreasing pairwise.
fn last_n_strictly_decreasing(history: &[u32], n: usize) -> bool {
    if history.len() < n {
        return false;
    }
    let tail = &history[history.len() - n..];
    tail.windows(2).all(|w| w[0] > w[1])
}

/// The full goal catalog, in evaluation (and display) order.
pub static CATALOG: &[GoalDef] = &[
    // --- Basic Understanding ---
    GoalDef {
        title: "Learn what linear equations are",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| ctx.progress.total >= 1,
        selection: SelectionRule::FirstN(1),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Understand how substitution works",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| ctx.progress.substitution >= 1,
        selection: SelectionRule::MostRecentMatching(|r| {
            r.parsed_method() == Some(Method::Substitution)
        }),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Understand how elimination works",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| ctx.progress.elimination >= 1,
        selection: SelectionRule::MostRecentMatching(|r| {
            r.parsed_method() == Some(Method::Elimination)
        }),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Understand how equalization works",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| ctx.progress.equalization >= 1,
        selection: SelectionRule::MostRecentMatching(|r| {
            r.parsed_method() == Some(Method::Equalization)
        }),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Identify suitable solution methods",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| ctx.progress.suitability >= 2,
        selection: SelectionRule::FirstMatching {
            n: 2,
            pred: |r| r.exercise_type.eq_ignore_ascii_case("suitability"),
        },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Match systems to solution strategies",
        category: GoalCategory::BasicUnderstanding,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| ctx.progress.matching >= 2,
        selection: SelectionRule::FirstMatching {
            n: 2,
            pred: |r| r.exercise_type.eq_ignore_ascii_case("matching"),
        },
        scoring: ScoringStrategy::Average,
    },
    // --- Method Mastery ---
    GoalDef {
        title: "Master substitution/equalization/elimination method",
        category: GoalCategory::MethodMastery,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| {
            ctx.progress.substitution >= 2
                || ctx.progress.elimination >= 2
                || ctx.progress.equalization >= 2
        },
        selection: SelectionRule::FirstMethodToReach { n: 2 },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Practice with different methods",
        category: GoalCategory::MethodMastery,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| ctx.progress.methods_used() >= 2,
        selection: SelectionRule::FirstPerDistinctMethod { distinct: 2 },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Switch methods strategically",
        category: GoalCategory::MethodMastery,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| ctx.progress.methods_used() == 3 && ctx.progress.total >= 3,
        selection: SelectionRule::FirstPerDistinctMethod { distinct: 3 },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Choose optimal methods consistently",
        category: GoalCategory::MethodMastery,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| ctx.progress.efficiency >= 3,
        selection: SelectionRule::FirstMatching {
            n: 3,
            pred: |r| r.exercise_type.eq_ignore_ascii_case("efficiency"),
        },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Master all three methods fluently",
        category: GoalCategory::MethodMastery,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| {
            ctx.progress.substitution >= 2
                && ctx.progress.elimination >= 2
                && ctx.progress.equalization >= 2
        },
        selection: SelectionRule::All,
        scoring: ScoringStrategy::WeightedByRecency,
    },
    // --- Problem Solving ---
    GoalDef {
        title: "Complete exercises without hints",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| session_hints(ctx) == Some(0),
        selection: SelectionRule::MostRecentMatching(|r| r.hints == 0),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Build confidence through success",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| session_hints(ctx).is_some_and(|h| h <= 2),
        selection: SelectionRule::MostRecentMatching(|r| r.hints <= 2),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Solve problems with minimal errors",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| session_errors(ctx).is_some_and(|e| e <= 1),
        selection: SelectionRule::MostRecentMatching(|r| r.errors <= 1),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Handle complex problems confidently",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| ctx.progress.total >= 5,
        selection: SelectionRule::FirstN(5),
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Show exceptional problem-solving",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| session_hints(ctx) == Some(0) && session_errors(ctx) == Some(0),
        selection: SelectionRule::MostRecentMatching(|r| r.is_flawless()),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Maintain accuracy under pressure",
        category: GoalCategory::ProblemSolving,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| {
            ctx.progress.total >= 5 && ctx.progress.mean_errors().is_some_and(|m| m <= 1.0)
        },
        selection: SelectionRule::All,
        scoring: ScoringStrategy::Average,
    },
    // --- Learning & Growth ---
    GoalDef {
        title: "Develop problem-solving resilience",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| session_errors(ctx).is_some_and(|e| e > 0),
        selection: SelectionRule::MostRecentMatching(|r| r.errors > 0),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Learn from mistakes effectively",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| {
            ctx.progress.total >= 3 && recent_mean_below_earlier(&ctx.progress.error_history, 3)
        },
        selection: SelectionRule::All,
        scoring: ScoringStrategy::WeightedByRecency,
    },
    GoalDef {
        title: "Reflect on method effectiveness",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Beginner,
        condition: |ctx| {
            ctx.session
                .is_some_and(|s| s.completed_with_self_explanation)
        },
        selection: SelectionRule::MostRecentMatching(|r| r.completed_with_self_explanation),
        scoring: ScoringStrategy::Single,
    },
    GoalDef {
        title: "Explain reasoning clearly",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Intermediate,
        condition: |ctx| ctx.progress.self_explanations >= 3,
        selection: SelectionRule::FirstMatching {
            n: 3,
            pred: |r| r.completed_with_self_explanation,
        },
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Show consistent improvement",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| last_n_strictly_decreasing(&ctx.progress.error_history, 4),
        selection: SelectionRule::LastN(4),
        scoring: ScoringStrategy::WeightedByRecency,
    },
    GoalDef {
        title: "Set personal learning challenges",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Advanced,
        condition: |ctx| ctx.progress.total >= 10,
        selection: SelectionRule::FirstN(10),
        scoring: ScoringStrategy::Average,
    },
    GoalDef {
        title: "Work independently",
        category: GoalCategory::LearningGrowth,
        difficulty: GoalDifficulty::Intermediate,
        // On completion this fires on the 3rd (and every later)
        // hint-free session; a standing check needs only the counter.
        condition: |ctx| match ctx.session {
            Some(session) => session.hints == 0 && ctx.progress.hint_free_sessions >= 3,
            None => ctx.progress.hint_free_sessions >= 3,
        },
        selection: SelectionRule::FirstMatching {
            n: 3,
            pred: |r| r.hints == 0,
        },
        scoring: ScoringStrategy::Average,
    },
];

/// Looks up a catalog entry by title.
pub fn find_goal(title: &str) -> Option<&'static GoalDef> {
    CATALOG.iter().find(|goal| goal.title == title)
}
