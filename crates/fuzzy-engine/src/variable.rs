//! Linguistic Variables

use crate::error::{ConfigError, FuzzyError};
use crate::membership::{MembershipFunction, Universe};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named fuzzy term of a linguistic variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    #[serde(rename = "breakpoints")]
    pub function: MembershipFunction,
}

impl Term {
    pub fn new(name: impl Into<String>, function: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

/// Degree of membership of a crisp value in one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDegree {
    pub term: String,
    pub degree: f64,
}

/// A quantity described by ordered, overlapping fuzzy terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VariableDef")]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

#[derive(Deserialize)]
struct VariableDef {
    name: String,
    universe: Universe,
    terms: Vec<Term>,
}

impl TryFrom<VariableDef> for LinguisticVariable {
    type Error = ConfigError;

    fn try_from(def: VariableDef) -> Result<Self, Self::Error> {
        LinguisticVariable::new(def.name, def.universe, def.terms)
    }
}

impl LinguisticVariable {
    /// Create a variable; term names must be unique and at least one term given
    pub fn new(
        name: impl Into<String>,
        universe: Universe,
        terms: Vec<Term>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if terms.is_empty() {
            return Err(ConfigError::NoTerms(name));
        }

        let mut seen = HashSet::new();
        for term in &terms {
            if !seen.insert(term.name.as_str()) {
                return Err(ConfigError::DuplicateTerm {
                    variable: name,
                    term: term.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            universe,
            terms,
        })
    }

    pub(crate) fn new_unchecked(name: &str, universe: Universe, terms: Vec<Term>) -> Self {
        Self {
            name: name.to_string(),
            universe,
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Reject values outside the universe instead of clamping them
    pub fn check_input(&self, value: f64) -> Result<(), FuzzyError> {
        if self.universe.contains(value) {
            Ok(())
        } else {
            Err(FuzzyError::OutOfRangeInput {
                variable: self.name.clone(),
                value,
                min: self.universe.min(),
                max: self.universe.max(),
            })
        }
    }

    /// Degrees for every term, in term order
    pub fn degrees(&self, value: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.function.degree(value)).collect()
    }

    /// Fuzzify a crisp value; zero degrees are kept
    pub fn fuzzify(&self, value: f64) -> Vec<TermDegree> {
        self.terms
            .iter()
            .map(|t| TermDegree {
                term: t.name.clone(),
                degree: t.function.degree(value),
            })
            .collect()
    }

    /// Lowest point of the universe where every term has zero membership
    ///
    /// Between two consecutive breakpoints each triangle is linear, so it is
    /// either zero on the whole open interval or positive on all of it. Checking
    /// every breakpoint and every midpoint is therefore exact.
    pub fn coverage_gap(&self) -> Option<f64> {
        let (min, max) = (self.universe.min(), self.universe.max());
        let mut knots: Vec<f64> = self
            .terms
            .iter()
            .flat_map(|t| t.function.breakpoints())
            .filter(|&x| x > min && x < max)
            .chain([min, max])
            .collect();
        knots.sort_by(f64::total_cmp);
        knots.dedup();

        let uncovered = |x: f64| self.terms.iter().all(|t| t.function.degree(x) == 0.0);
        knots
            .windows(2)
            .flat_map(|pair| [pair[0], (pair[0] + pair[1]) / 2.0])
            .chain([max])
            .find(|&x| uncovered(x))
    }

    /// Universe, breakpoints and sampled curves for plotting
    pub fn describe(&self) -> VariableDescription {
        let universe: Vec<f64> = self.universe.points().collect();
        let terms = self
            .terms
            .iter()
            .map(|t| TermDescription {
                name: t.name.clone(),
                breakpoints: t.function.breakpoints(),
                curve: universe.iter().map(|&x| t.function.degree(x)).collect(),
            })
            .collect();

        VariableDescription {
            name: self.name.clone(),
            min: self.universe.min(),
            max: self.universe.max(),
            step: self.universe.step(),
            universe,
            terms,
        }
    }
}

/// Read-only view of a variable for visualization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDescription {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Sample points of the universe, ascending
    pub universe: Vec<f64>,
    pub terms: Vec<TermDescription>,
}

/// Read-only view of one term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermDescription {
    pub name: String,
    pub breakpoints: [f64; 3],
    /// Membership at each universe sample point
    pub curve: Vec<f64>,
}
