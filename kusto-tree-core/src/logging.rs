//! Per-run log file.
//!
//! Each run writes to its own timestamped file. The subscriber is installed as
//! the thread's default for as long as the returned [`RunLog`] is alive, so
//! nothing is initialized globally and dropping the guard ends the log.

use crate::config::RunConfig;
use crate::error::{KustoTreeError, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "kusto_tree";

/// Scoped logging context for one run.
///
/// Log events are recorded to [`RunLog::path`] until this value is dropped.
pub struct RunLog {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}

impl RunLog {
    /// Path of the log file for this run.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Creates the run log file and installs it as the current thread's log sink.
///
/// Lines carry a timestamp, level, target and message, without ANSI colors.
///
/// # Errors
/// Returns an error if the directory or file cannot be created, or if the
/// filter directive is invalid.
///
/// # Example
/// ```rust,no_run
/// use kusto_tree_core::{RunConfig, init_run_log};
///
/// let run_log = init_run_log(&RunConfig::new()).expect("Failed to create run log");
/// tracing::info!("written to {}", run_log.path().display());
/// ```
pub fn init_run_log(config: &RunConfig) -> Result<RunLog> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        KustoTreeError::configuration(format!(
            "Invalid log filter '{}': {}",
            config.log_filter, e
        ))
    })?;

    fs::create_dir_all(&config.log_dir).map_err(|e| {
        KustoTreeError::io(
            format!("Failed to create log directory {}", config.log_dir.display()),
            e,
        )
    })?;

    let path = config.log_dir.join(log_file_name(&Local::now()));
    let file = File::create(&path)
        .map_err(|e| KustoTreeError::io(format!("Failed to create {}", path.display()), e))?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);

    Ok(RunLog {
        path,
        _guard: guard,
    })
}

/// File name of the run log started at `started`.
pub fn log_file_name(started: &DateTime<Local>) -> String {
    format!(
        "{}_{}.log",
        LOG_FILE_PREFIX,
        started.format("%Y%m%d_%H%M%S")
    )
}
