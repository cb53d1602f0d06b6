//! Log setup.
//!
//! The TUI owns the terminal, so logs go to a file under ${SOUK_HOME}/logs.
//! The SOUK_LOG environment variable controls the filter (tracing env-filter
//! syntax); the default keeps souk at info and silences dependencies.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::paths;

/// Initializes file logging and returns the guard that flushes on drop.
///
/// The guard must be held for the lifetime of the process.
pub fn init() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "souk.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("SOUK_LOG").unwrap_or_else(|_| EnvFilter::new("souk=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
