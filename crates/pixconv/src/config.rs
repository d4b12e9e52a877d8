use std::path::Path;

use pixconv_imgproc::parallel::ExecutionStrategy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`FilterConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON or has unexpected fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable form of [`ExecutionStrategy`].
///
/// In JSON: `"serial"`, `"parallel_rows"` or `{"fixed": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Run on the current thread.
    Serial,
    /// Run rows on the global thread pool.
    #[default]
    ParallelRows,
    /// Run rows on a dedicated pool with this many threads.
    Fixed(usize),
}

impl From<StrategyConfig> for ExecutionStrategy {
    fn from(config: StrategyConfig) -> Self {
        match config {
            StrategyConfig::Serial => ExecutionStrategy::Serial,
            StrategyConfig::ParallelRows => ExecutionStrategy::ParallelRows,
            StrategyConfig::Fixed(n) => ExecutionStrategy::Fixed(n),
        }
    }
}

/// Configuration of a [`crate::FilterService`].
///
/// Missing fields take their default values.
///
/// # Examples
///
/// ```
/// use pixconv::{FilterConfig, StrategyConfig};
///
/// let config = FilterConfig::from_json_str(r#"{ "default_filter": "blur" }"#).unwrap();
/// assert_eq!(config.default_filter, "blur");
/// assert_eq!(config.strategy, StrategyConfig::ParallelRows);
/// assert!(config.warn_on_unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Filter applied when a request names none.
    pub default_filter: String,
    /// How the convolution rows are scheduled.
    pub strategy: StrategyConfig,
    /// Log a warning when a request names an unknown filter.
    pub warn_on_unknown: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_filter: "none".to_string(),
            strategy: StrategyConfig::default(),
            warn_on_unknown: true,
        }
    }
}

impl FilterConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter applied when a request names none.
    pub fn with_default_filter(mut self, name: impl Into<String>) -> Self {
        self.default_filter = name.into();
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable warnings for unknown filter names.
    pub fn with_warn_on_unknown(mut self, warn: bool) -> Self {
        self.warn_on_unknown = warn;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The execution strategy to hand to the filters.
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.strategy.into()
    }
}
