//! Adaptive feedback for the tutor.
//!
//! Classifies a student's technical performance and self-reported
//! emotional state into one named pattern from a fixed,
//! priority-ordered catalog, then renders a feedback message that
//! cites the concrete numbers behind the classification. The
//! classifier is a heuristic cascade, not a model; the ordering of the
//! rules is part of its contract.

pub mod classifier;
pub mod messages;

pub use classifier::{classify, Classification, PatternInput, PerformancePattern};
pub use messages::generate_feedback;
