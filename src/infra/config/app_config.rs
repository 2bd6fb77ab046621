use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::session::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub credentials: CredentialsConfig,
    pub image_generation: ImageGenerationConfig,
    pub connectivity: ConnectivityConfig,
    pub asset_cache: AssetCacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file; defaults to the storage layout's log dir.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsConfig {
    pub wifi_ip: String,
    pub user_password: String,
    /// Read once at startup, never editable from the admin panel.
    pub admin_password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            wifi_ip: "192.168.1.1".to_owned(),
            user_password: "hostel-vibes".to_owned(),
            admin_password: "admin-password-123".to_owned(),
        }
    }
}

impl CredentialsConfig {
    pub fn initial_credentials(&self) -> Credentials {
        Credentials {
            wifi_ip: self.wifi_ip.trim().to_owned(),
            user_password: self.user_password.trim().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageGenerationConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// `{prompt}` is replaced by the user's prompt.
    pub prompt_template: String,
}

impl Default for ImageGenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            model: "imagen-3.0-generate-002".to_owned(),
            api_key_env: "API_KEY".to_owned(),
            prompt_template: "A vibrant, fun, gen-z style sticker or meme about: {prompt}"
                .to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectivityConfig {
    pub probe_addr: String,
    pub probe_interval_ms: u64,
    pub probe_timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: "generativelanguage.googleapis.com:443".to_owned(),
            probe_interval_ms: 5_000,
            probe_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetCacheConfig {
    /// Version name; every other cache directory is purged on start.
    pub cache_name: String,
    /// URLs under this origin are fetched network-first.
    pub network_first_origin: String,
    /// URLs fetched into the cache on install.
    pub precache: Vec<String>,
}

impl Default for AssetCacheConfig {
    fn default() -> Self {
        Self {
            cache_name: "localnet-chat-cache-v2".to_owned(),
            network_first_origin: "https://picsum.photos".to_owned(),
            precache: Vec::new(),
        }
    }
}
