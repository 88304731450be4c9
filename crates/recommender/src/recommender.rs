//! Recommender Implementation

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use fuzzy_engine::{FuzzyEngine, InferenceResult, VariableDescription};
use serde::Serialize;
use std::sync::Arc;
use task_selector::{RotationState, Selection, TaskSelector};
use tracing::{debug, info};

/// Recommended task for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "taskLevel")]
    pub level: String,
    #[serde(rename = "taskDescription")]
    pub task: String,
    #[serde(rename = "crispOutput")]
    pub crisp_output: f64,
}

/// Engine and selector composed behind the two caller-facing operations
pub struct Recommender {
    engine: FuzzyEngine,
    selector: TaskSelector,
}

impl Recommender {
    /// Build from configuration with fresh rotation state
    pub fn new(config: RecommenderConfig) -> Result<Self, RecommendError> {
        Self::with_rotation(config, RotationState::shared())
    }

    /// Build with an injected rotation state
    pub fn with_rotation(
        config: RecommenderConfig,
        rotation: Arc<RotationState>,
    ) -> Result<Self, RecommendError> {
        let engine = config.calibration.build()?;
        let selector = TaskSelector::new(
            engine.task_variable(),
            config.catalog,
            config.selection,
            rotation,
        )?;

        info!(
            "Recommender ready: {} rules, {} task levels",
            engine.rules().len(),
            selector.levels().len()
        );

        Ok(Self { engine, selector })
    }

    /// Infer a difficulty for the inputs and serve the next task at that level
    pub fn recommend(
        &self,
        time_minutes: f64,
        proficiency: f64,
    ) -> Result<Recommendation, RecommendError> {
        let (result, selection) = self.explain(time_minutes, proficiency)?;
        Ok(Recommendation {
            level: selection.level,
            task: selection.task,
            crisp_output: result.crisp_output,
        })
    }

    /// Like `recommend`, but returns the full inference trace and selection
    pub fn explain(
        &self,
        time_minutes: f64,
        proficiency: f64,
    ) -> Result<(InferenceResult, Selection), RecommendError> {
        let result = self.engine.infer(time_minutes, proficiency)?;
        let selection = self.selector.select(&result)?;

        debug!(
            "Recommended {} ({}) for time={} proficiency={}",
            selection.level, selection.cursor, time_minutes, proficiency
        );

        Ok((result, selection))
    }

    /// Universes and term breakpoints of every linguistic variable
    pub fn describe(&self) -> Vec<VariableDescription> {
        self.engine.describe()
    }

    pub fn engine(&self) -> &FuzzyEngine {
        &self.engine
    }

    pub fn selector(&self) -> &TaskSelector {
        &self.selector
    }
}
