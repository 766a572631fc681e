use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use tracing_subscriber::{EnvFilter, fmt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{TelemetryConfig, TelemetryError};

const QUIET_DEPS: &str = "hyper_util=warn,reqwest=warn";

/// Install the global subscriber: a rolling daily file under `log_dir` plus
/// stderr. Keep the returned guard alive for the life of the program.
pub fn init_tracing(config: &TelemetryConfig, log_dir: &Path) -> Result<WorkerGuard, TelemetryError> {
    let default_level = if config.is_development { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},{QUIET_DEPS}")));

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "front.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_ansi(config.is_development)
        .with_writer(std::io::stderr);

    // try_init: a subscriber may already be installed by the host.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    tracing::info!(environment = %config.environment, "tracing initialized");
    Ok(guard)
}

/// Stderr-only subscriber for tests.
pub fn init_tracing_tests(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},{QUIET_DEPS}")));

    let console_subscriber = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_line_number(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_test_writer();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_subscriber)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_into_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let guard = init_tracing(&TelemetryConfig::development(), &logs).unwrap();
        assert!(logs.is_dir());
        drop(guard);
    }
}
