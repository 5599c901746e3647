//! Sidecar log output: console plus a rolling file in the log directory

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::{Config, LogRotation};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

fn rotation(kind: LogRotation) -> Rotation {
    match kind {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

/// `<log_dir>/<prefix>[.<period>].log`, rolled per `app_log_rotation`.
pub fn app_log_appender(config: &Config) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(rotation(config.app_log_rotation))
        .filename_prefix(&config.app_log_prefix)
        .filename_suffix("log")
        .build(&config.log_dir)
        .with_context(|| format!("Failed to open app log in {}", config.log_dir.display()))
}

/// Install the global subscriber. Keep the returned guard alive for the life
/// of the process or buffered file output is lost.
pub fn setup_logging(config: &Config) -> Result<Arc<LoggingGuard>> {
    let (non_blocking, guard) = tracing_appender::non_blocking(app_log_appender(config)?);

    let (json_file, text_file) = if config.app_log_json {
        (
            Some(fmt::layer().json().with_writer(non_blocking)),
            None,
        )
    } else {
        (
            None,
            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_ansi(false)
                    .compact(),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(true))
        .with(json_file)
        .with(text_file)
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .try_init()
        .context("Logging already initialized")?;

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

/// Create the directory holding the heartbeat log, marker file and
/// application logs.
pub fn setup_output_directories(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))
}
