//! Task Selection
//!
//! Turns a defuzzified difficulty into one of the ordered task levels and
//! serves that level's tasks in round-robin order.

mod catalog;
mod rotation;
mod selector;

pub use catalog::{CatalogLevel, TaskCatalog};
pub use rotation::RotationState;
pub use selector::{PolicyKind, Selection, SelectorConfig, TaskSelector};

use thiserror::Error;

/// Errors during task selection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("No task determinable: every level has zero membership at {crisp}")]
    NoTaskDeterminable { crisp: f64 },
    #[error("Unknown level: {0}")]
    UnknownLevel(String),
    #[error("Level index {index} outside [1, {count}]")]
    LevelIndexOutOfRange { index: i64, count: usize },
    #[error("Level {0} has no tasks to rotate through")]
    EmptyLevel(String),
    #[error("Selector state lock error: {0}")]
    StateLock(String),
}

/// Errors while building a catalog or selector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Task catalog has no levels")]
    Empty,
    #[error("Level {0} has no tasks")]
    EmptyLevel(String),
    #[error("Duplicate level: {0}")]
    DuplicateLevel(String),
    #[error("Catalog levels {catalog:?} do not match {variable} terms {terms:?}")]
    LevelMismatch {
        variable: String,
        catalog: Vec<String>,
        terms: Vec<String>,
    },
}
