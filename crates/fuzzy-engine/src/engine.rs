//! Mamdani Inference Engine Implementation

use crate::error::{ConfigError, FuzzyError};
use crate::rules::{Rule, RuleBase};
use crate::variable::{LinguisticVariable, TermDegree, VariableDescription};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Firing strength of one rule for a given input pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    pub time: String,
    pub proficiency: String,
    pub consequent: String,
    /// min(time degree, proficiency degree)
    pub strength: f64,
}

/// One point of the aggregated output set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub membership: f64,
}

/// Everything computed by one inference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceResult {
    pub time_minutes: f64,
    pub proficiency: f64,
    pub time_degrees: Vec<TermDegree>,
    pub proficiency_degrees: Vec<TermDegree>,
    /// Every rule in table order, including those with zero strength
    pub firings: Vec<RuleFiring>,
    /// Max firing strength per consequent term, in term order
    pub activations: Vec<TermDegree>,
    /// Aggregated output set over the consequent universe
    pub aggregate: Vec<SamplePoint>,
    /// Centroid of the aggregate
    pub crisp_output: f64,
}

impl InferenceResult {
    /// Rules with nonzero strength
    pub fn fired_rules(&self) -> impl Iterator<Item = &RuleFiring> {
        self.firings.iter().filter(|f| f.strength > 0.0)
    }

    pub fn activation(&self, term: &str) -> Option<f64> {
        self.activations
            .iter()
            .find(|a| a.term == term)
            .map(|a| a.degree)
    }
}

/// Two-input, one-output Mamdani engine (min for AND, max for aggregation,
/// centroid defuzzification)
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    time: LinguisticVariable,
    proficiency: LinguisticVariable,
    task: LinguisticVariable,
    rules: RuleBase,
    /// Consequent sample points
    samples: Vec<f64>,
    /// Membership of each consequent term at each sample point
    term_curves: Vec<Vec<f64>>,
}

impl FuzzyEngine {
    /// Build an engine, validating rule coverage and input coverage
    pub fn new(
        time: LinguisticVariable,
        proficiency: LinguisticVariable,
        task: LinguisticVariable,
        rules: Vec<Rule>,
    ) -> Result<Self, ConfigError> {
        let rules = RuleBase::new(rules, &time, &proficiency, &task)?;

        for input in [&time, &proficiency] {
            if let Some(value) = input.coverage_gap() {
                return Err(ConfigError::CoverageGap {
                    variable: input.name().to_string(),
                    value,
                });
            }
        }

        let samples: Vec<f64> = task.universe().points().collect();
        let term_curves = task
            .terms()
            .iter()
            .map(|t| samples.iter().map(|&x| t.function.degree(x)).collect())
            .collect();

        info!(
            "Creating fuzzy engine: {} x {} -> {} ({} rules, {} output samples)",
            time.name(),
            proficiency.name(),
            task.name(),
            rules.len(),
            samples.len()
        );

        Ok(Self {
            time,
            proficiency,
            task,
            rules,
            samples,
            term_curves,
        })
    }

    /// Run one inference. Pure: identical inputs give identical results.
    pub fn infer(
        &self,
        time_minutes: f64,
        proficiency: f64,
    ) -> Result<InferenceResult, FuzzyError> {
        for (variable, value) in [(&self.time, time_minutes), (&self.proficiency, proficiency)] {
            if let Err(e) = variable.check_input(value) {
                warn!("Rejected input: {}", e);
                return Err(e);
            }
        }

        let time_degrees = self.time.degrees(time_minutes);
        let proficiency_degrees = self.proficiency.degrees(proficiency);

        let mut activations = vec![0.0_f64; self.task.terms().len()];
        let firings: Vec<RuleFiring> = self
            .rules
            .compiled()
            .map(|(rule, compiled)| {
                let strength =
                    time_degrees[compiled.time].min(proficiency_degrees[compiled.proficiency]);
                let slot = &mut activations[compiled.consequent];
                *slot = slot.max(strength);
                RuleFiring {
                    time: rule.time.clone(),
                    proficiency: rule.proficiency.clone(),
                    consequent: rule.consequent.clone(),
                    strength,
                }
            })
            .collect();

        let aggregate: Vec<SamplePoint> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let membership = self
                    .term_curves
                    .iter()
                    .zip(&activations)
                    .map(|(curve, &level)| curve[i].min(level))
                    .fold(0.0, f64::max);
                SamplePoint { x, membership }
            })
            .collect();

        let crisp_output = centroid(&aggregate).ok_or(FuzzyError::NoRuleFired)?;

        debug!(
            "Inference ({}, {}) -> {:.4} with {} fired rules",
            time_minutes,
            proficiency,
            crisp_output,
            firings.iter().filter(|f| f.strength > 0.0).count()
        );

        Ok(InferenceResult {
            time_minutes,
            proficiency,
            time_degrees: label(&self.time, time_degrees),
            proficiency_degrees: label(&self.proficiency, proficiency_degrees),
            firings,
            activations: label(&self.task, activations),
            aggregate,
            crisp_output,
        })
    }

    pub fn time_variable(&self) -> &LinguisticVariable {
        &self.time
    }

    pub fn proficiency_variable(&self) -> &LinguisticVariable {
        &self.proficiency
    }

    pub fn task_variable(&self) -> &LinguisticVariable {
        &self.task
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Universe and term breakpoints of all three variables
    pub fn describe(&self) -> Vec<VariableDescription> {
        vec![
            self.time.describe(),
            self.proficiency.describe(),
            self.task.describe(),
        ]
    }
}

/// `Σ x·μ(x) / Σ μ(x)`, or `None` when the set is empty
fn centroid(points: &[SamplePoint]) -> Option<f64> {
    let (weighted, total) = points.iter().fold((0.0, 0.0), |(w, t), p| {
        (w + p.x * p.membership, t + p.membership)
    });
    if total > 0.0 {
        Some(weighted / total)
    } else {
        None
    }
}

fn label(variable: &LinguisticVariable, degrees: Vec<f64>) -> Vec<TermDegree> {
    variable
        .terms()
        .iter()
        .zip(degrees)
        .map(|(t, degree)| TermDegree {
            term: t.name.clone(),
            degree,
        })
        .collect()
}
