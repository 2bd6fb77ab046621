use std::{
    path::Path,
    sync::mpsc::{self, Receiver},
};

use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::{
        events::{AppEvent, ConnectivityStatus},
        store::AppStore,
    },
    imagegen::{
        client::ImagenClient,
        worker::{DisabledImageGeneration, ImageGenerationPort, ImageGenerationWorker},
    },
    infra::{
        self,
        asset_cache::AssetCache,
        config::AppConfig,
        connectivity::ConnectivityMonitor,
        error::AppError,
        http_fetcher::HttpFetcher,
        opener::SystemOpener,
        storage_layout::StorageLayout,
    },
    usecases::{
        context::AppContext,
        shell::{DefaultShellOrchestrator, MediaServices},
    },
};

const CONNECTIVITY_MONITOR_START_FAILED: &str = "CONNECTIVITY_MONITOR_START_FAILED";
const ASSET_CACHE_INSTALL_FAILED: &str = "ASSET_CACHE_INSTALL_FAILED";

pub type AppShell =
    DefaultShellOrchestrator<Box<dyn ImageGenerationPort>, HttpFetcher, SystemOpener>;

/// The running shell plus the channels that feed it.
pub struct ShellComposition {
    pub orchestrator: AppShell,
    pub app_events: Receiver<AppEvent>,
    pub connectivity: Receiver<ConnectivityStatus>,
    /// Kept alive for the shell's lifetime; stops its thread on drop.
    pub connectivity_monitor: Option<ConnectivityMonitor>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let dotenv = dotenvy::dotenv();

    let config = infra::config::load(config_path)?;
    let layout = StorageLayout::resolve()?;
    layout.ensure_dirs()?;
    let log_guard = infra::logging::init(&config.logging, &layout.log_file())?;

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(error) if error.not_found() => tracing::debug!("no .env file"),
        Err(error) => tracing::warn!(error = %error, "failed to read .env"),
    }

    let runtime = build_runtime()?;
    tracing::info!(
        log_level = %config.logging.level,
        cache_name = %config.asset_cache.cache_name,
        "bootstrap complete"
    );

    Ok(AppContext::new(
        config,
        layout,
        runtime,
        reqwest::Client::new(),
        log_guard,
    ))
}

fn build_runtime() -> Result<Runtime, AppError> {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("localnet-chat-rt")
        .enable_all()
        .build()
        .map_err(AppError::RuntimeStart)
}

pub fn compose_shell(context: &AppContext) -> ShellComposition {
    let (event_tx, app_events) = mpsc::channel();
    let (status_tx, connectivity) = mpsc::channel();

    let connectivity_monitor =
        match ConnectivityMonitor::start(&context.config.connectivity, status_tx) {
            Ok(monitor) => Some(monitor),
            Err(error) => {
                tracing::warn!(
                    code = CONNECTIVITY_MONITOR_START_FAILED,
                    error = %error,
                    "connectivity monitor failed to start; assuming online"
                );
                None
            }
        };

    let generator: Box<dyn ImageGenerationPort> =
        match ImagenClient::from_env(&context.config.image_generation, context.http.clone()) {
            Ok(client) => Box::new(ImageGenerationWorker::with_client(
                context.runtime.handle().clone(),
                client,
                event_tx,
            )),
            Err(error) => {
                tracing::warn!(
                    code = error.code(),
                    "image generation unavailable; the rest of the app keeps working"
                );
                Box::new(DisabledImageGeneration::new(&error))
            }
        };

    let fetcher = HttpFetcher::new(context.http.clone(), context.runtime.handle().clone());
    let cache = prepare_asset_cache(&context.config, &context.layout, &fetcher);

    let store = AppStore::init(
        context.config.credentials.initial_credentials(),
        &context.config.credentials.admin_password,
    );
    let media = MediaServices {
        images_dir: context.layout.images_dir.clone(),
        cache,
        fetcher,
        opener: SystemOpener,
    };

    ShellComposition {
        orchestrator: DefaultShellOrchestrator::new(store, generator, media),
        app_events,
        connectivity,
        connectivity_monitor,
    }
}

/// Purges stale cache versions and fills the precache list. Failures
/// are logged; the cache still works on demand.
fn prepare_asset_cache(
    config: &AppConfig,
    layout: &StorageLayout,
    fetcher: &HttpFetcher,
) -> AssetCache {
    let cache = AssetCache::new(layout.assets_dir.clone(), &config.asset_cache);

    match cache.activate() {
        Ok(purged) if !purged.is_empty() => {
            tracing::info!(purged = purged.len(), "stale asset caches removed");
        }
        Ok(_) => {}
        Err(error) => tracing::warn!(error = %error, "asset cache activation failed"),
    }

    if !config.asset_cache.precache.is_empty() {
        if let Err(error) = cache.install(&config.asset_cache.precache, fetcher) {
            tracing::warn!(
                code = ASSET_CACHE_INSTALL_FAILED,
                error = %error,
                "asset precache skipped"
            );
        }
    }

    cache
}
