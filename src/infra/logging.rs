use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs a file-backed subscriber; the terminal belongs to the TUI.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(config: &LogConfig, default_file: &Path) -> Result<WorkerGuard, AppError> {
    let file = config.file.as_deref().unwrap_or(default_file);
    let directory = file.parent().unwrap_or_else(|| Path::new("."));
    let file_name = file
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| "localnet-chat.log".into());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(guard)
}
