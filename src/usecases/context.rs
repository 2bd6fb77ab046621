use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

/// Process-wide services built once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    pub runtime: Runtime,
    pub http: reqwest::Client,
    _log_guard: WorkerGuard,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        layout: StorageLayout,
        runtime: Runtime,
        http: reqwest::Client,
        log_guard: WorkerGuard,
    ) -> Self {
        Self {
            config,
            layout,
            runtime,
            http,
            _log_guard: log_guard,
        }
    }
}
