//! Feedback message generation.
//!
//! One template per pattern. Every message cites the concrete session
//! numbers that justified the classification, so a student can see why
//! the agent said what it said.

use crate::classifier::{classify, Classification, PatternInput, PerformancePattern};

/// Classifies the input and renders the matching feedback message.
pub fn generate_feedback(input: &PatternInput) -> String {
    let classification = classify(input);
    render(input, &classification)
}

fn render(input: &PatternInput, classification: &Classification) -> String {
    let hints = input.hints;
    let errors = input.errors;

    match classification.pattern {
        PerformancePattern::NotUsingHints => format!(
            "You made {errors} errors without using a single hint. Hints aren't cheating - try one the next time you get stuck."
        ),
        PerformancePattern::HintDependent => format!(
            "Zero errors - well done! You used {hints} hints to get there, though. Next time, try a step on your own before asking."
        ),
        PerformancePattern::Perfectionist => format!(
            "A flawless exercise: {errors} errors, {hints} hints. You seem hard on yourself anyway - a perfect run is allowed to feel good."
        ),
        PerformancePattern::Overconfident => format!(
            "You're feeling confident, but this exercise took {hints} hints and {errors} errors. Slow down and double-check each transformation."
        ),
        PerformancePattern::ImpostorSyndrome => format!(
            "Your numbers say you're doing well ({hints} hints, {errors} errors), even if it doesn't feel that way. Trust the evidence."
        ),
        PerformancePattern::BurnoutFatigue => format!(
            "You've been working hard across {} exercises and it shows. A short break now will help more than another exercise.",
            input.progress.total
        ),
        PerformancePattern::FlowState => format!(
            "You're in the zone: {errors} errors, {hints} hints, and enjoying it. Keep riding this momentum."
        ),
        PerformancePattern::FrustratedLearner => format!(
            "This one was a grind - {hints} hints and {errors} errors despite real effort. That effort still counts; the method gets smoother with practice."
        ),
        PerformancePattern::AnxiousHighAchiever => format!(
            "You solved this well ({hints} hints, {errors} errors) but it cost you a lot of worry. Your results have earned you some calm."
        ),
        PerformancePattern::Struggling => format!(
            "That was a tough one: {hints} hints and {errors} errors. Let's revisit the method step by step before the next exercise."
        ),
        PerformancePattern::HighPerformance => format!(
            "Strong work - {errors} errors and only {hints} hints. You're ready for harder systems."
        ),
        PerformancePattern::ConsistentImprovement => {
            let delta = improvement_delta(&input.progress.error_history);
            format!(
                "Your recent exercises average {delta:.1} fewer errors than your earlier ones. The practice is paying off."
            )
        }
        PerformancePattern::MixedPerformance => format!(
            "Solid numbers ({hints} hints, {errors} errors), but it didn't feel great. Which step felt shakiest? Start there next time."
        ),
        PerformancePattern::BuildingConfidence => format!(
            "Another clean exercise: {hints} hints, {errors} errors. Each one like this builds your footing."
        ),
        PerformancePattern::Generic => format!(
            "Exercise complete: {hints} hints, {errors} errors. On to the next one."
        ),
    }
}

/// How much the last three exercises improved over the earlier mean.
fn improvement_delta(history: &[u32]) -> f64 {
    if history.len() < 4 {
        return 0.0;
    }
    let (earlier, recent) = history.split_at(history.len() - 3);
    mean(earlier) - mean(recent)
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().sum();
    f64::from(sum) / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_models::{ExerciseSession, Progress};

    fn input(hints: u32, errors: u32) -> PatternInput {
        PatternInput::from_session(
            &ExerciseSession::new(hints, errors, "substitution"),
            Progress::default(),
        )
    }

    #[test]
    fn test_message_cites_session_numbers() {
        let message = generate_feedback(&input(0, 4));
        assert!(message.contains("4 errors"));
    }

    #[test]
    fn test_every_pattern_renders() {
        // Render each template directly; the cascade is tested in the
        // classifier module.
        for rule in crate::classifier::PATTERN_RULES {
            let classification = Classification {
                pattern: rule.pattern,
                confidence: 0.5,
            };
            let message = render(&input(1, 2), &classification);
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn test_improvement_message_shows_delta() {
        let mut i = input(1, 1);
        i.progress.total = 5;
        i.progress.error_history = vec![4, 4, 1, 1, 0];
        let message = generate_feedback(&i);
        // mean(4, 4) - mean(1, 1, 0) = 4.0 - 0.666... ~ 3.3
        assert!(message.contains("3.3 fewer errors"), "got: {message}");
    }
}
