//! Engine calibration
//!
//! The canonical calibration uses continuous universes: time [0, 50],
//! proficiency [0, 5] and task [0, 5]. The outermost input terms are
//! shoulders so the universe bounds always fire a rule.

use crate::engine::FuzzyEngine;
use crate::error::ConfigError;
use crate::membership::{MembershipFunction, Universe};
use crate::rules::Rule;
use crate::variable::{LinguisticVariable, Term};
use serde::{Deserialize, Serialize};

pub const TIME_AVAILABLE: &str = "time_available";
pub const PROFICIENCY_LEVEL: &str = "proficiency_level";
pub const LEARNING_TASK: &str = "learning_task";

/// Rows are time terms, columns proficiency terms
static RULE_TABLE: [(&str, [&str; 5]); 5] = [
    ("minimal", ["simple", "easy", "easy", "standard", "standard"]),
    ("short", ["simple", "easy", "standard", "standard", "hard"]),
    ("moderate", ["easy", "standard", "standard", "hard", "hard"]),
    ("consistent", ["standard", "standard", "hard", "hard", "complex"]),
    ("intensive", ["standard", "hard", "hard", "complex", "complex"]),
];

static PROFICIENCY_TERMS: [&str; 5] = [
    "starter",
    "beginner",
    "intermediate",
    "proficient",
    "advanced",
];

/// Variables and rule table the engine is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub time_available: LinguisticVariable,
    pub proficiency_level: LinguisticVariable,
    pub learning_task: LinguisticVariable,
    pub rules: Vec<Rule>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            time_available: variable(
                TIME_AVAILABLE,
                Universe::new_unchecked(0.0, 50.0, 1.0),
                &[
                    ("minimal", [0.0, 0.0, 20.0]),
                    ("short", [10.0, 20.0, 30.0]),
                    ("moderate", [20.0, 30.0, 40.0]),
                    ("consistent", [30.0, 40.0, 50.0]),
                    ("intensive", [40.0, 50.0, 50.0]),
                ],
            ),
            proficiency_level: variable(
                PROFICIENCY_LEVEL,
                Universe::new_unchecked(0.0, 5.0, 1.0),
                &[
                    ("starter", [0.0, 0.0, 2.0]),
                    ("beginner", [1.0, 2.0, 3.0]),
                    ("intermediate", [2.0, 3.0, 4.0]),
                    ("proficient", [3.0, 4.0, 5.0]),
                    ("advanced", [4.0, 5.0, 5.0]),
                ],
            ),
            learning_task: variable(
                LEARNING_TASK,
                Universe::new_unchecked(0.0, 5.0, 1.0),
                &[
                    ("simple", [0.0, 1.0, 2.0]),
                    ("easy", [1.0, 2.0, 3.0]),
                    ("standard", [2.0, 3.0, 4.0]),
                    ("hard", [3.0, 4.0, 5.0]),
                    ("complex", [4.0, 5.0, 5.0]),
                ],
            ),
            rules: RULE_TABLE
                .iter()
                .flat_map(|(time, row)| {
                    PROFICIENCY_TERMS
                        .iter()
                        .zip(row.iter())
                        .map(move |(proficiency, task)| Rule::new(time, proficiency, task))
                })
                .collect(),
        }
    }
}

fn variable(name: &str, universe: Universe, terms: &[(&str, [f64; 3])]) -> LinguisticVariable {
    let terms = terms
        .iter()
        .map(|(term, [a, b, c])| {
            Term::new(*term, MembershipFunction::triangular_unchecked(*a, *b, *c))
        })
        .collect();
    LinguisticVariable::new_unchecked(name, universe, terms)
}

impl Calibration {
    /// Build a validated engine from this calibration
    pub fn build(&self) -> Result<FuzzyEngine, ConfigError> {
        FuzzyEngine::new(
            self.time_available.clone(),
            self.proficiency_level.clone(),
            self.learning_task.clone(),
            self.rules.clone(),
        )
    }
}
