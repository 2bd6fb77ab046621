use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{
    AppConfig, AssetCacheConfig, ConnectivityConfig, CredentialsConfig, ImageGenerationConfig,
    LogConfig,
};

/// On-disk shape: every section and key is optional and merged over
/// the defaults.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub credentials: Option<FileCredentialsConfig>,
    pub image_generation: Option<FileImageGenerationConfig>,
    pub connectivity: Option<FileConnectivityConfig>,
    pub asset_cache: Option<FileAssetCacheConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(credentials) = self.credentials {
            credentials.merge_into(&mut config.credentials);
        }

        if let Some(image_generation) = self.image_generation {
            image_generation.merge_into(&mut config.image_generation);
        }

        if let Some(connectivity) = self.connectivity {
            connectivity.merge_into(&mut config.connectivity);
        }

        if let Some(asset_cache) = self.asset_cache {
            asset_cache.merge_into(&mut config.asset_cache);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileCredentialsConfig {
    pub wifi_ip: Option<String>,
    pub user_password: Option<String>,
    pub admin_password: Option<String>,
}

impl FileCredentialsConfig {
    fn merge_into(self, config: &mut CredentialsConfig) {
        if let Some(wifi_ip) = self.wifi_ip {
            config.wifi_ip = wifi_ip;
        }

        if let Some(user_password) = self.user_password {
            config.user_password = user_password;
        }

        if let Some(admin_password) = self.admin_password {
            config.admin_password = admin_password;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileImageGenerationConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub prompt_template: Option<String>,
}

impl FileImageGenerationConfig {
    fn merge_into(self, config: &mut ImageGenerationConfig) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if let Some(model) = self.model {
            config.model = model;
        }

        if let Some(api_key_env) = self.api_key_env {
            config.api_key_env = api_key_env;
        }

        if let Some(prompt_template) = self.prompt_template {
            config.prompt_template = prompt_template;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConnectivityConfig {
    pub probe_addr: Option<String>,
    pub probe_interval_ms: Option<u64>,
    pub probe_timeout_ms: Option<u64>,
}

impl FileConnectivityConfig {
    fn merge_into(self, config: &mut ConnectivityConfig) {
        if let Some(probe_addr) = self.probe_addr {
            config.probe_addr = probe_addr;
        }

        if let Some(interval_ms) = self.probe_interval_ms {
            config.probe_interval_ms = interval_ms;
        }

        if let Some(timeout_ms) = self.probe_timeout_ms {
            config.probe_timeout_ms = timeout_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileAssetCacheConfig {
    pub cache_name: Option<String>,
    pub network_first_origin: Option<String>,
    pub precache: Option<Vec<String>>,
}

impl FileAssetCacheConfig {
    fn merge_into(self, config: &mut AssetCacheConfig) {
        if let Some(cache_name) = self.cache_name {
            config.cache_name = cache_name;
        }

        if let Some(origin) = self.network_first_origin {
            config.network_first_origin = origin;
        }

        if let Some(precache) = self.precache {
            config.precache = precache;
        }
    }
}
