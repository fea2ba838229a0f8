//! Goal catalog and completion engine for the tutor.
//!
//! A single static [`CATALOG`] defines every learning goal: its
//! completion predicate, the rule selecting the exercise records that
//! justify completion, and the strategy aggregating those records into
//! the mistake-count score shown to the student. Evaluation, selection
//! and scoring all read the same catalog entry, so they cannot drift
//! apart for a given goal.

pub mod catalog;
pub mod engine;
pub mod evaluator;
pub mod scoring;

pub use catalog::{find_goal, EvalContext, GoalCategory, GoalDef, GoalDifficulty, CATALOG};
pub use engine::GoalEngine;
pub use evaluator::{check_goal_satisfied, check_progressive_goals};
pub use scoring::{
    calculate_goal_score, get_contributing_exercises, GoalScore, ScoringStrategy, SelectionRule,
};
