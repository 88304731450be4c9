//! Rule Base
//!
//! Rules are plain data: one time term, one proficiency term, one task term.
//! The table is checked once at construction so that every pair of input
//! terms has exactly one rule.

use crate::error::ConfigError;
use crate::variable::LinguisticVariable;
use serde::{Deserialize, Serialize};

/// `time AND proficiency => consequent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub time: String,
    pub proficiency: String,
    pub consequent: String,
}

impl Rule {
    pub fn new(time: &str, proficiency: &str, consequent: &str) -> Self {
        Self {
            time: time.to_string(),
            proficiency: proficiency.to_string(),
            consequent: consequent.to_string(),
        }
    }
}

/// A rule resolved to term indices of its variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompiledRule {
    pub time: usize,
    pub proficiency: usize,
    pub consequent: usize,
}

/// Validated, complete rule table
#[derive(Debug, Clone)]
pub struct RuleBase {
    rules: Vec<Rule>,
    compiled: Vec<CompiledRule>,
}

fn resolve(variable: &LinguisticVariable, term: &str) -> Result<usize, ConfigError> {
    variable
        .term_index(term)
        .ok_or_else(|| ConfigError::UnknownTerm {
            variable: variable.name().to_string(),
            term: term.to_string(),
        })
}

impl RuleBase {
    /// Resolve and check a rule table against its three variables
    pub fn new(
        rules: Vec<Rule>,
        time: &LinguisticVariable,
        proficiency: &LinguisticVariable,
        task: &LinguisticVariable,
    ) -> Result<Self, ConfigError> {
        let columns = proficiency.terms().len();
        let mut grid: Vec<bool> = vec![false; time.terms().len() * columns];
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in &rules {
            let resolved = CompiledRule {
                time: resolve(time, &rule.time)?,
                proficiency: resolve(proficiency, &rule.proficiency)?,
                consequent: resolve(task, &rule.consequent)?,
            };

            let cell = &mut grid[resolved.time * columns + resolved.proficiency];
            if *cell {
                return Err(ConfigError::DuplicateRule {
                    time: rule.time.clone(),
                    proficiency: rule.proficiency.clone(),
                });
            }
            *cell = true;
            compiled.push(resolved);
        }

        if let Some(missing) = grid.iter().position(|covered| !covered) {
            return Err(ConfigError::MissingRule {
                time: time.terms()[missing / columns].name.clone(),
                proficiency: proficiency.terms()[missing % columns].name.clone(),
            });
        }

        Ok(Self { rules, compiled })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn compiled(&self) -> impl Iterator<Item = (&Rule, &CompiledRule)> {
        self.rules.iter().zip(self.compiled.iter())
    }
}
