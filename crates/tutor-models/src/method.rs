//! Solution methods and exercise types.
//!
//! Sessions arrive from the exercise UI with methods and exercise types
//! as raw strings. Older clients submitted methods as numeric codes
//! ("0"/"1"/"2"); [`Method::parse`] is the single adapter that maps both
//! spellings onto the closed enum, so "unrecognized method" is an
//! explicit branch for every consumer rather than a silent fallthrough.

use serde::{Deserialize, Serialize};

/// A method for solving a linear equation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Solve one equation for a variable and substitute it into the other.
    Substitution,
    /// Add scaled equations to eliminate a variable.
    Elimination,
    /// Solve both equations for the same variable and equate them.
    Equalization,
}

impl Method {
    /// Parses a method from a raw session string.
    ///
    /// Accepts case-insensitive method names and the legacy numeric
    /// codes: "0" = equalization, "1" = substitution, "2" = elimination.
    /// Returns `None` for anything else; callers decide how an
    /// unrecognized method affects their accounting.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "substitution" | "1" => Some(Self::Substitution),
            "elimination" | "2" => Some(Self::Elimination),
            "equalization" | "0" => Some(Self::Equalization),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substitution => "substitution",
            Self::Elimination => "elimination",
            Self::Equalization => "equalization",
        }
    }

    /// All methods, in display order.
    pub const ALL: [Method; 3] = [Self::Substitution, Self::Elimination, Self::Equalization];
}

/// The kind of exercise a student completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Judge whether a method is suitable for a given system.
    Suitability,
    /// Pick the most efficient method for a given system.
    Efficiency,
    /// Match systems to solution strategies.
    Matching,
}

impl ExerciseType {
    /// Parses an exercise type from a raw session string (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "suitability" => Some(Self::Suitability),
            "efficiency" => Some(Self::Efficiency),
            "matching" => Some(Self::Matching),
            _ => None,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suitability => "suitability",
            Self::Efficiency => "efficiency",
            Self::Matching => "matching",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_names_case_insensitive() {
        assert_eq!(Method::parse("Substitution"), Some(Method::Substitution));
        assert_eq!(Method::parse("ELIMINATION"), Some(Method::Elimination));
        assert_eq!(Method::parse("equalization"), Some(Method::Equalization));
    }

    #[test]
    fn test_parse_legacy_numeric_codes() {
        assert_eq!(Method::parse("0"), Some(Method::Equalization));
        assert_eq!(Method::parse("1"), Some(Method::Substitution));
        assert_eq!(Method::parse("2"), Some(Method::Elimination));
    }

    #[test]
    fn test_parse_unrecognized_method() {
        assert_eq!(Method::parse("gaussian"), None);
        assert_eq!(Method::parse(""), None);
        assert_eq!(Method::parse("3"), None);
    }

    #[test]
    fn test_parse_exercise_type() {
        assert_eq!(
            ExerciseType::parse("Efficiency"),
            Some(ExerciseType::Efficiency)
        );
        assert_eq!(ExerciseType::parse("unknown"), None);
    }
}
