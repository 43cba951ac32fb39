//! Tracing subscriber setup

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_LEVEL, LogConfig, log_path};

/// Install the global tracing subscriber.
///
/// Logs go to stderr unless `config.file` is set, in which case they are
/// appended to [`log_path`]. The returned guard must be held until exit so
/// buffered file output is flushed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), &config.level);
    let filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .context("Failed to build log filter")?;

    if config.file {
        let path = log_path();
        let dir = path
            .parent()
            .ok_or_else(|| anyhow!("Log path has no parent: {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow!("Log path has no file name: {}", path.display()))?;

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false);

        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

        Ok(Some(guard))
    } else {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

        Ok(None)
    }
}

/// RUST_LOG wins over the configured level when it is set and non-empty
fn filter_directive(rust_log: Option<String>, configured: &str) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}
