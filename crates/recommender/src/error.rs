//! Recommendation Error Types

use fuzzy_engine::FuzzyError;
use serde::Serialize;
use task_selector::{CatalogError, SelectionError};
use thiserror::Error;

/// Errors surfaced to the caller of `recommend`
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Inference(#[from] FuzzyError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] fuzzy_engine::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Coarse error category for transport-level mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    OutOfRangeInput,
    NoRuleFired,
    NoTaskDeterminable,
    UnknownLevel,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::OutOfRangeInput => "out_of_range_input",
            ErrorKind::NoRuleFired => "no_rule_fired",
            ErrorKind::NoTaskDeterminable => "no_task_determinable",
            ErrorKind::UnknownLevel => "unknown_level",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Internal => "internal",
        }
    }
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecommendError::Inference(FuzzyError::OutOfRangeInput { .. }) => {
                ErrorKind::OutOfRangeInput
            }
            RecommendError::Inference(FuzzyError::NoRuleFired) => ErrorKind::NoRuleFired,
            RecommendError::Selection(SelectionError::NoTaskDeterminable { .. }) => {
                ErrorKind::NoTaskDeterminable
            }
            RecommendError::Selection(SelectionError::UnknownLevel(_))
            | RecommendError::Selection(SelectionError::LevelIndexOutOfRange { .. }) => {
                ErrorKind::UnknownLevel
            }
            RecommendError::Selection(SelectionError::EmptyLevel(_))
            | RecommendError::Calibration(_)
            | RecommendError::Catalog(_)
            | RecommendError::Config(_) => ErrorKind::Configuration,
            RecommendError::Selection(SelectionError::StateLock(_)) => ErrorKind::Internal,
        }
    }

    /// Whether the caller supplied bad input (as opposed to a server-side defect)
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::OutOfRangeInput
    }
}
