//! File logging. The terminal belongs to the TUI, so events go to a daily
//! rolling file under the config directory.
//!
//! Environment variables used:
//! - TSCAN_LOG: filter directives (e.g. "debug", "tscan=trace"); default is "info"

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "TSCAN_LOG";
const LOG_FILE_PREFIX: &str = "tscan.log";

/// Filter from `TSCAN_LOG`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the guard alive for the whole run;
/// dropping it flushes pending lines.
pub fn setup_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {dir:?}"))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let format = fmt::format()
        .with_level(true)
        .with_target(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_ansi(false)
                .event_format(format)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
