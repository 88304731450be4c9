//! Fuzzy Task Recommender
//!
//! Recommends a speaking task from the minutes a learner has available and
//! their self-rated proficiency. Fuzzy inference yields a crisp difficulty,
//! which the task selector turns into a level and a rotating task.

mod config;
mod error;
mod recommender;

pub use crate::config::{LoggingConfig, RecommenderConfig, ENV_PREFIX};
pub use error::{ErrorKind, RecommendError};
pub use recommender::{Recommendation, Recommender};

pub use fuzzy_engine::{InferenceResult, TermDescription, VariableDescription};
pub use task_selector::{PolicyKind, RotationState, Selection, SelectorConfig};

use tracing_subscriber::EnvFilter;

/// Initialize logging; `RUST_LOG` takes precedence over `config.level`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
