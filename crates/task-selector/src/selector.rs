//! Task Selector Implementation

use crate::catalog::TaskCatalog;
use crate::rotation::RotationState;
use crate::{CatalogError, SelectionError};
use fuzzy_engine::{InferenceResult, LinguisticVariable, MembershipFunction};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// How the crisp output becomes a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Round half up to the nearest 1-based level index
    #[default]
    NearestLevel,
    /// Weighted draw by each level's membership at the crisp value
    Probabilistic,
}

/// Selector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub policy: PolicyKind,
    /// Clamp rounded indices into `[1, levels]` instead of rejecting them
    pub clamp_level_index: bool,
    /// Fixed RNG seed for the probabilistic policy (entropy if unset)
    pub seed: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::NearestLevel,
            clamp_level_index: true,
            seed: None,
        }
    }
}

/// A chosen level and task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub level: String,
    /// 1-based position of the level, easiest first
    pub level_index: usize,
    pub task: String,
    /// Position of `task` within its level
    pub cursor: usize,
}

/// Picks a level from an inference result, then the next task of that level
pub struct TaskSelector {
    config: SelectorConfig,
    catalog: TaskCatalog,
    /// Level names in order, one per consequent term
    levels: Vec<String>,
    /// Each level's own membership function
    functions: Vec<MembershipFunction>,
    rotation: Arc<RotationState>,
    rng: Mutex<StdRng>,
}

impl TaskSelector {
    /// Create a selector; catalog levels must match the consequent terms in order
    pub fn new(
        consequent: &LinguisticVariable,
        catalog: TaskCatalog,
        config: SelectorConfig,
        rotation: Arc<RotationState>,
    ) -> Result<Self, CatalogError> {
        let terms: Vec<String> = consequent.terms().iter().map(|t| t.name.clone()).collect();
        let levels = catalog.level_names();
        if levels != terms {
            return Err(CatalogError::LevelMismatch {
                variable: consequent.name().to_string(),
                catalog: levels,
                terms,
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Creating task selector: policy {:?}, {} levels",
            config.policy,
            levels.len()
        );

        Ok(Self {
            functions: consequent.terms().iter().map(|t| t.function).collect(),
            config,
            catalog,
            levels,
            rotation,
            rng: Mutex::new(rng),
        })
    }

    /// Choose a level for `result` and serve that level's next task
    pub fn select(&self, result: &InferenceResult) -> Result<Selection, SelectionError> {
        let level_index = self.choose_level(result.crisp_output)?;
        let level = &self.levels[level_index - 1];

        let tasks = self
            .catalog
            .tasks(level)
            .ok_or_else(|| SelectionError::UnknownLevel(level.clone()))?;
        let cursor = self.rotation.advance(level, tasks.len())?;

        debug!(
            "Selected {} (index {}) task {} for crisp {:.4}",
            level, level_index, cursor, result.crisp_output
        );

        Ok(Selection {
            level: level.clone(),
            level_index,
            task: tasks[cursor].clone(),
            cursor,
        })
    }

    /// 1-based level index for a crisp value under the configured policy
    pub fn choose_level(&self, crisp: f64) -> Result<usize, SelectionError> {
        match self.config.policy {
            PolicyKind::NearestLevel => self.nearest_level(crisp),
            PolicyKind::Probabilistic => self.draw_level(crisp),
        }
    }

    fn nearest_level(&self, crisp: f64) -> Result<usize, SelectionError> {
        let count = self.levels.len();
        let rounded = (crisp + 0.5).floor();

        if !rounded.is_finite() {
            return Err(SelectionError::NoTaskDeterminable { crisp });
        }

        if self.config.clamp_level_index {
            return Ok(rounded.clamp(1.0, count as f64) as usize);
        }

        if rounded < 1.0 || rounded > count as f64 {
            warn!("Rejected level index {} for crisp {}", rounded, crisp);
            return Err(SelectionError::LevelIndexOutOfRange {
                index: rounded as i64,
                count,
            });
        }
        Ok(rounded as usize)
    }

    fn draw_level(&self, crisp: f64) -> Result<usize, SelectionError> {
        let probabilities = self.level_probabilities(crisp)?;
        let distribution = WeightedIndex::new(&probabilities)
            .map_err(|_| SelectionError::NoTaskDeterminable { crisp })?;

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| SelectionError::StateLock(format!("Lock error: {}", e)))?;
        Ok(distribution.sample(&mut *rng) + 1)
    }

    /// Each level's membership at `crisp`, normalized to sum to 1
    pub fn level_probabilities(&self, crisp: f64) -> Result<Vec<f64>, SelectionError> {
        let degrees: Vec<f64> = self.functions.iter().map(|f| f.degree(crisp)).collect();
        let total: f64 = degrees.iter().sum();
        if total == 0.0 {
            return Err(SelectionError::NoTaskDeterminable { crisp });
        }
        Ok(degrees.into_iter().map(|d| d / total).collect())
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn rotation(&self) -> &Arc<RotationState> {
        &self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogLevel;
    use fuzzy_engine::{Calibration, FuzzyEngine};

    fn engine() -> FuzzyEngine {
        Calibration::default().build().unwrap()
    }

    fn selector(config: SelectorConfig) -> TaskSelector {
        TaskSelector::new(
            &Calibration::default().learning_task,
            TaskCatalog::default(),
            config,
            RotationState::shared(),
        )
        .unwrap()
    }

    fn probabilistic(seed: u64) -> TaskSelector {
        selector(SelectorConfig {
            policy: PolicyKind::Probabilistic,
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_rotation_law() {
        let engine = engine();
        let selector = selector(SelectorConfig::default());
        let standard = TaskCatalog::default().tasks("standard").unwrap().to_vec();

        let result = engine.infer(20.0, 3.0).unwrap();
        let served: Vec<String> = (0..6)
            .map(|_| selector.select(&result).unwrap().task)
            .collect();

        assert_eq!(served[..3], standard[..]);
        assert_eq!(served[3..], standard[..]);
    }

    #[test]
    fn test_selection_reports_level() {
        let engine = engine();
        let selector = selector(SelectorConfig::default());
        let selection = selector.select(&engine.infer(20.0, 3.0).unwrap()).unwrap();
        assert_eq!(selection.level, "standard");
        assert_eq!(selection.level_index, 3);
        assert_eq!(selection.cursor, 0);
    }

    #[test]
    fn test_round_half_up() {
        let selector = selector(SelectorConfig::default());
        assert_eq!(selector.choose_level(2.5).unwrap(), 3);
        assert_eq!(selector.choose_level(2.4999).unwrap(), 2);
        assert_eq!(selector.choose_level(1.0).unwrap(), 1);
        assert_eq!(selector.choose_level(4.5).unwrap(), 5);
    }

    #[test]
    fn test_clamped_index() {
        let selector = selector(SelectorConfig::default());
        assert_eq!(selector.choose_level(0.2).unwrap(), 1);
        assert_eq!(selector.choose_level(7.0).unwrap(), 5);
    }

    #[test]
    fn test_unclamped_index_rejected() {
        let selector = selector(SelectorConfig {
            clamp_level_index: false,
            ..Default::default()
        });
        assert_eq!(
            selector.choose_level(0.2).unwrap_err(),
            SelectionError::LevelIndexOutOfRange { index: 0, count: 5 }
        );
        assert_eq!(
            selector.choose_level(5.6).unwrap_err(),
            SelectionError::LevelIndexOutOfRange { index: 6, count: 5 }
        );
        assert_eq!(selector.choose_level(5.0).unwrap(), 5);
    }

    #[test]
    fn test_independent_selectors_rotate_independently() {
        let engine = engine();
        let result = engine.infer(20.0, 3.0).unwrap();
        let first = selector(SelectorConfig::default());
        let second = selector(SelectorConfig::default());

        first.select(&result).unwrap();
        first.select(&result).unwrap();
        assert_eq!(second.select(&result).unwrap().cursor, 0);
        assert_eq!(first.rotation().cursor("standard").unwrap(), 2);
    }

    #[test]
    fn test_shared_rotation_state() {
        let engine = engine();
        let result = engine.infer(20.0, 3.0).unwrap();
        let rotation = RotationState::shared();
        let variable = Calibration::default().learning_task;
        let a = TaskSelector::new(
            &variable,
            TaskCatalog::default(),
            SelectorConfig::default(),
            Arc::clone(&rotation),
        )
        .unwrap();
        let b = TaskSelector::new(
            &variable,
            TaskCatalog::default(),
            SelectorConfig::default(),
            rotation,
        )
        .unwrap();

        assert_eq!(a.select(&result).unwrap().cursor, 0);
        assert_eq!(b.select(&result).unwrap().cursor, 1);
    }

    #[test]
    fn test_level_probabilities_at_boundary() {
        let selector = selector(SelectorConfig::default());
        let probabilities = selector.level_probabilities(2.5).unwrap();
        assert_eq!(probabilities, vec![0.0, 0.5, 0.5, 0.0, 0.0]);

        let peak = selector.level_probabilities(4.0).unwrap();
        assert_eq!(peak, vec![0.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_probabilistic_frequencies_converge() {
        let selector = probabilistic(42);
        let draws = 10_000;
        let mut counts = [0usize; 5];
        for _ in 0..draws {
            counts[selector.choose_level(2.5).unwrap() - 1] += 1;
        }

        assert_eq!(counts[0] + counts[3] + counts[4], 0);
        for count in [counts[1], counts[2]] {
            let frequency = count as f64 / draws as f64;
            assert!((0.47..=0.53).contains(&frequency), "frequency {}", frequency);
        }
    }

    #[test]
    fn test_probabilistic_at_peak_is_certain() {
        let selector = probabilistic(7);
        for _ in 0..100 {
            assert_eq!(selector.choose_level(3.0).unwrap(), 3);
        }
    }

    #[test]
    fn test_no_task_determinable() {
        let selector = probabilistic(1);
        // outside every level's support
        assert_eq!(
            selector.choose_level(-1.0).unwrap_err(),
            SelectionError::NoTaskDeterminable { crisp: -1.0 }
        );
    }

    #[test]
    fn test_level_mismatch_rejected() {
        let catalog = TaskCatalog::new(vec![
            CatalogLevel::new("simple", &["a"]),
            CatalogLevel::new("easy", &["b"]),
        ])
        .unwrap();
        let err = TaskSelector::new(
            &Calibration::default().learning_task,
            catalog,
            SelectorConfig::default(),
            RotationState::shared(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, CatalogError::LevelMismatch { .. }));
    }

    #[test]
    fn test_policy_config_deserializes() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{ "policy": "probabilistic", "seed": 9 }"#).unwrap();
        assert_eq!(config.policy, PolicyKind::Probabilistic);
        assert!(config.clamp_level_index);
        assert_eq!(config.seed, Some(9));
    }
}
