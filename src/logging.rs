//! File-based tracing setup for the card driver
//!
//! Output goes to a rolling file because stdout belongs to the interactive
//! prompt. `RUST_LOG` overrides the default filter, `REQUESTARR_LOG_DIR`
//! the directory.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const LOG_DIR_ENV: &str = "REQUESTARR_LOG_DIR";

const DEFAULT_LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "requestarr-card";
const DEFAULT_FILTER: &str = "requestarr_card=debug,warn";

fn log_dir() -> PathBuf {
    std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Installs the global subscriber writing to
/// `<dir>/requestarr-card.YYYY-MM-DD.log`, rotated daily.
///
/// The returned guard flushes buffered lines when dropped; hold it until exit.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init()?;

    tracing::info!(dir = %dir.display(), "Logging initialized");
    Ok(guard)
}

/// Log the result of a channel call; failures are warnings since the
/// controller degrades instead of propagating them
#[macro_export]
macro_rules! log_channel_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(operation = $operation, "Channel call succeeded"),
            Err(e) => tracing::warn!(operation = $operation, error = %e, "Channel call failed"),
        }
    };
}

/// Log the start of a channel call with optional context fields
#[macro_export]
macro_rules! log_channel_request {
    ($operation:expr) => {
        tracing::debug!(operation = $operation, "Channel call started");
    };
    ($operation:expr, $($field:tt)+) => {
        tracing::debug!(operation = $operation, $($field)+, "Channel call started");
    };
}
