//! Fuzzy Inference Engine
//!
//! Mamdani-style inference over two input variables (time available,
//! proficiency level) and one output variable (learning task difficulty):
//! - Triangular membership functions over sampled universes
//! - Data-driven rule table checked for complete coverage
//! - Min for conjunction, max for aggregation
//! - Centroid defuzzification

mod calibration;
mod engine;
mod error;
mod membership;
mod rules;
mod variable;

pub use calibration::{Calibration, LEARNING_TASK, PROFICIENCY_LEVEL, TIME_AVAILABLE};
pub use engine::{FuzzyEngine, InferenceResult, RuleFiring, SamplePoint};
pub use error::{ConfigError, FuzzyError};
pub use membership::{MAX_UNIVERSE_STEPS, MembershipFunction, Universe};
pub use rules::{Rule, RuleBase};
pub use variable::{LinguisticVariable, Term, TermDegree, TermDescription, VariableDescription};
