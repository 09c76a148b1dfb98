//! Log initialization.
//!
//! The terminal belongs to the UI, so logs go to a daily-rolling file in
//! `$PMS_HOME/logs/`. The filter comes from `PMS_LOG` if set, otherwise from
//! `[logging] level` in the config.

use std::path::Path;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "PMS_LOG";

const LOG_FILE_PREFIX: &str = "pms.log";

/// Builds the log filter from `PMS_LOG` or the configured level.
///
/// An invalid filter falls back to `info`.
pub fn env_filter(config: &Config) -> EnvFilter {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| config.logging.level.clone());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to the default logs directory.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes buffered log lines.
///
/// # Errors
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    init_in(&paths::logs_dir(), config)
}

/// Installs the global subscriber writing to `dir`.
///
/// # Errors
/// See [`init`].
pub fn init_in(dir: &Path, config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(guard)
}
