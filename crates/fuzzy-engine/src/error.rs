//! Fuzzy Engine Error Types

use thiserror::Error;

/// Errors raised while running an inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// Crisp input outside the variable's universe
    #[error("{variable} value {value} is out of range [{min}, {max}]")]
    OutOfRangeInput {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Aggregated output set is zero everywhere
    #[error("No rule fired: aggregated output set is empty")]
    NoRuleFired,
}

/// Errors raised while building variables, rules or the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Universe bounds or resolution unusable
    #[error("Invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    /// Triangular breakpoints not finite or not ordered
    #[error("Invalid triangular breakpoints [{a}, {b}, {c}]: expected finite a <= b <= c")]
    InvalidBreakpoints { a: f64, b: f64, c: f64 },

    /// Variable declared without terms
    #[error("Variable {0} has no terms")]
    NoTerms(String),

    /// Two terms share a name
    #[error("Duplicate term {term} in variable {variable}")]
    DuplicateTerm { variable: String, term: String },

    /// Rule names a term the variable does not have
    #[error("Rule references unknown term {term} of variable {variable}")]
    UnknownTerm { variable: String, term: String },

    /// Antecedent pair appears more than once
    #[error("Duplicate rule for ({time}, {proficiency})")]
    DuplicateRule { time: String, proficiency: String },

    /// Antecedent pair has no rule
    #[error("Missing rule for ({time}, {proficiency})")]
    MissingRule { time: String, proficiency: String },

    /// A sample point of an input universe has zero membership in every term
    #[error("No term of {variable} covers value {value}")]
    CoverageGap { variable: String, value: f64 },
}
