//! Performance pattern classifier.
//!
//! A strict priority cascade: rules are tried in order and the first
//! full match wins, so a session that numerically fits several
//! patterns is always attributed to the highest-priority one. The
//! cascade is a static table, which keeps the ordering testable
//! independent of the message templates.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tutor_models::{ExerciseSession, Progress};

/// Named performance/emotional-state patterns, in no particular order.
///
/// Classification priority lives in [`PATTERN_RULES`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformancePattern {
    NotUsingHints,
    HintDependent,
    Perfectionist,
    Overconfident,
    ImpostorSyndrome,
    BurnoutFatigue,
    FlowState,
    FrustratedLearner,
    AnxiousHighAchiever,
    Struggling,
    HighPerformance,
    ConsistentImprovement,
    MixedPerformance,
    BuildingConfidence,
    Generic,
}

impl PerformancePattern {
    /// Returns the snake_case tag used in logs and stored feedback.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotUsingHints => "not_using_hints",
            Self::HintDependent => "hint_dependent",
            Self::Perfectionist => "perfectionist",
            Self::Overconfident => "overconfident",
            Self::ImpostorSyndrome => "impostor_syndrome",
            Self::BurnoutFatigue => "burnout_fatigue",
            Self::FlowState => "flow_state",
            Self::FrustratedLearner => "frustrated_learner",
            Self::AnxiousHighAchiever => "anxious_high_achiever",
            Self::Struggling => "struggling",
            Self::HighPerformance => "high_performance",
            Self::ConsistentImprovement => "consistent_improvement",
            Self::MixedPerformance => "mixed_performance",
            Self::BuildingConfidence => "building_confidence",
            Self::Generic => "generic",
        }
    }
}

/// Classifier input: one session's numbers, optional post-exercise
/// ratings (1-5 scale) and the student's accumulated progress.
///
/// A comparison against an absent rating is simply false; partial
/// ratings degrade gracefully toward the technical-only patterns.
#[derive(Debug, Clone)]
pub struct PatternInput {
    pub hints: u32,
    pub errors: u32,
    pub satisfaction: Option<u8>,
    pub confidence: Option<u8>,
    pub effort: Option<u8>,
    pub enjoyment: Option<u8>,
    pub anxiety: Option<u8>,
    pub progress: Progress,
}

impl PatternInput {
    /// Builds an input from a finished session, with no ratings yet.
    pub fn from_session(session: &ExerciseSession, progress: Progress) -> Self {
        Self {
            hints: session.hints,
            errors: session.errors,
            satisfaction: None,
            confidence: None,
            effort: None,
            enjoyment: None,
            anxiety: None,
            progress,
        }
    }

    /// Sets the post-exercise satisfaction rating.
    pub fn with_satisfaction(mut self, rating: u8) -> Self {
        self.satisfaction = Some(rating);
        self
    }

    /// Sets the post-exercise confidence rating.
    pub fn with_confidence(mut self, rating: u8) -> Self {
        self.confidence = Some(rating);
        self
    }

    /// Sets the post-exercise effort rating.
    pub fn with_effort(mut self, rating: u8) -> Self {
        self.effort = Some(rating);
        self
    }

    /// Sets the post-exercise enjoyment rating.
    pub fn with_enjoyment(mut self, rating: u8) -> Self {
        self.enjoyment = Some(rating);
        self
    }

    /// Sets the post-exercise anxiety rating.
    pub fn with_anxiety(mut self, rating: u8) -> Self {
        self.anxiety = Some(rating);
        self
    }
}

/// A classified pattern with its confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub pattern: PerformancePattern,
    pub confidence: f64,
}

/// One cascade rule: matches an input or passes to the next rule.
pub struct PatternRule {
    pub pattern: PerformancePattern,
    /// Returns the confidence when the rule matches.
    pub matches: fn(&PatternInput) -> Option<f64>,
}

fn ge(rating: Option<u8>, threshold: u8) -> bool {
    rating.is_some_and(|r| r >= threshold)
}

fn le(rating: Option<u8>, threshold: u8) -> bool {
    rating.is_some_and(|r| r <= threshold)
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().sum();
    f64::from(sum) / values.len() as f64
}

/// The cascade, highest priority first.
pub static PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        pattern: PerformancePattern::NotUsingHints,
        matches: |i| (i.hints == 0 && i.errors >= 3).then_some(0.85),
    },
    PatternRule {
        pattern: PerformancePattern::HintDependent,
        matches: |i| (i.hints >= 3 && i.errors == 0).then_some(0.85),
    },
    PatternRule {
        pattern: PerformancePattern::Perfectionist,
        matches: |i| {
            (i.hints == 0 && i.errors == 0 && (ge(i.anxiety, 4) || le(i.satisfaction, 2)))
                .then_some(0.85)
        },
    },
    PatternRule {
        pattern: PerformancePattern::Overconfident,
        matches: |i| {
            ((i.hints >= 3 || i.errors >= 3) && ge(i.confidence, 4) && le(i.anxiety, 2))
                .then_some(0.8)
        },
    },
    PatternRule {
        pattern: PerformancePattern::ImpostorSyndrome,
        matches: |i| {
            (i.hints <= 2 && i.errors <= 1 && le(i.confidence, 2)).then_some(0.8)
        },
    },
    PatternRule {
        pattern: PerformancePattern::BurnoutFatigue,
        matches: |i| {
            (i.progress.total >= 3
                && le(i.satisfaction, 2)
                && ge(i.anxiety, 4)
                && ge(i.effort, 3))
            .then_some(0.75)
        },
    },
    PatternRule {
        pattern: PerformancePattern::FlowState,
        matches: |i| {
            (i.hints <= 2
                && i.errors <= 2
                && ge(i.satisfaction, 4)
                && le(i.anxiety, 2)
                && ge(i.enjoyment, 4))
            .then_some(0.9)
        },
    },
    PatternRule {
        pattern: PerformancePattern::FrustratedLearner,
        matches: |i| {
            ((i.hints >= 2 || i.errors >= 2)
                && ge(i.effort, 4)
                && (le(i.satisfaction, 2) || le(i.confidence, 2)))
            .then_some(0.75)
        },
    },
    PatternRule {
        pattern: PerformancePattern::AnxiousHighAchiever,
        matches: |i| {
            (i.hints <= 2
                && i.errors <= 1
                && ge(i.anxiety, 4)
                && (ge(i.effort, 4) || le(i.enjoyment, 2)))
            .then_some(0.8)
        },
    },
    PatternRule {
        pattern: PerformancePattern::Struggling,
        matches: |i| {
            if i.hints < 3 && i.errors < 3 {
                return None;
            }
            let emotional =
                le(i.confidence, 2) || le(i.satisfaction, 2) || ge(i.anxiety, 4);
            let severe = i.hints >= 4 || i.errors >= 4;
            Some(if emotional && severe { 0.9 } else { 0.7 })
        },
    },
    PatternRule {
        pattern: PerformancePattern::HighPerformance,
        matches: |i| {
            if i.hints > 1 || i.errors > 1 {
                return None;
            }
            if ge(i.confidence, 4) && ge(i.satisfaction, 4) {
                Some(0.9)
            } else if i.hints == 0 && i.errors == 0 {
                Some(0.8)
            } else if ge(i.confidence, 4) || ge(i.satisfaction, 4) {
                Some(0.7)
            } else {
                None
            }
        },
    },
    PatternRule {
        pattern: PerformancePattern::ConsistentImprovement,
        matches: |i| {
            let history = &i.progress.error_history;
            if history.len() < 3 {
                return None;
            }
            let (earlier, recent) = history.split_at(history.len() - 3);
            (earlier.len() >= 2 && mean(recent) < mean(earlier) && i.progress.total >= 5)
                .then_some(0.8)
        },
    },
    PatternRule {
        pattern: PerformancePattern::MixedPerformance,
        matches: |i| {
            (i.hints <= 2
                && i.errors <= 2
                && (le(i.satisfaction, 2) || ge(i.anxiety, 4)))
            .then_some(0.7)
        },
    },
    PatternRule {
        pattern: PerformancePattern::BuildingConfidence,
        matches: |i| {
            (i.hints <= 2
                && i.errors <= 2
                && i.progress.total >= 2
                && (ge(i.confidence, 3) || i.confidence.is_none()))
            .then_some(0.6)
        },
    },
    PatternRule {
        pattern: PerformancePattern::Generic,
        matches: |_| Some(0.3),
    },
];

/// Classifies an input; always returns exactly one pattern.
pub fn classify(input: &PatternInput) -> Classification {
    for rule in PATTERN_RULES {
        if let Some(confidence) = (rule.matches)(input) {
            debug!(pattern = rule.pattern.as_str(), confidence, "pattern classified");
            return Classification {
                pattern: rule.pattern,
                confidence,
            };
        }
    }
    // The generic rule always matches; this is unreachable in practice.
    Classification {
        pattern: PerformancePattern::Generic,
        confidence: 0.3,
    }
}
