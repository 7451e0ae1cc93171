//! Run configuration read from the environment.
//!
//! The command line carries only the cluster address, so everything else is
//! configured through environment variables with sensible defaults.

use crate::error::{KustoTreeError, Result};
use std::path::{Path, PathBuf};

/// Overrides the directory run logs are written to.
pub const LOG_DIR_ENV: &str = "KUSTO_TREE_LOG_DIR";
/// Overrides the log filter directive (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_FILTER_ENV: &str = "KUSTO_TREE_LOG";

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

const LOG_DIR_NAME: &str = "logs";

/// Configuration for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory receiving the per-run log file; created if absent.
    pub log_dir: PathBuf,
    /// Filter directive for the run log.
    pub log_filter: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RunConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from defaults plus environment overrides.
    ///
    /// # Errors
    /// Returns a configuration error if an override is set to a blank value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = non_blank_var(LOG_DIR_ENV)? {
            config = config.with_log_dir(dir);
        }
        if let Some(filter) = non_blank_var(LOG_FILTER_ENV)? {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }

    /// Sets the log directory.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Sets the log filter directive.
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }
}

/// `logs/` next to the running executable, or `./logs` if that is unknown.
pub fn default_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| PathBuf::from(LOG_DIR_NAME), |dir| dir.join(LOG_DIR_NAME))
}

fn non_blank_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(KustoTreeError::configuration(format!(
            "{name} is set but empty"
        ))),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(KustoTreeError::configuration(format!(
            "{name} is not valid unicode"
        ))),
    }
}
