//! Recommender configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `FUZZY_TUTOR__*` environment variables
//! (e.g. `FUZZY_TUTOR__SELECTION__POLICY=probabilistic`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use fuzzy_engine::Calibration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use task_selector::{SelectorConfig, TaskCatalog};

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "FUZZY_TUTOR";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Full recommender configuration; every section falls back to its default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub selection: SelectorConfig,
    pub calibration: Calibration,
    pub catalog: TaskCatalog,
    pub logging: LoggingConfig,
}

impl RecommenderConfig {
    /// Load from an optional TOML file plus `FUZZY_TUTOR__*` overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    /// Same as [`load`](Self::load) with a custom environment prefix
    pub fn load_with_env_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        Self::layered(builder, prefix)
    }

    /// Parse TOML text plus `FUZZY_TUTOR__*` overrides
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(source, FileFormat::Toml));
        Self::layered(builder, ENV_PREFIX)
    }

    fn layered(builder: ConfigBuilder<DefaultState>, prefix: &str) -> Result<Self, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
