//! Versioned on-disk cache for remote assets (avatars, remote images).
//!
//! Layout: `<root>/<cache_name>/<url-safe base64 of the URL>`. Only one
//! cache name is live at a time; `activate` deletes the rest.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

use crate::infra::{
    config::AssetCacheConfig,
    contracts::{AssetFetcher, FetchedAsset},
};

const HTTP_OK: u16 = 200;

#[derive(Debug, Error)]
pub enum AssetCacheError {
    #[error("asset cache io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("{url} answered with status {status}")]
    BadStatus { url: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Not cacheable; straight to the network.
    Bypass,
    NetworkFirst,
    CacheFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAsset {
    pub bytes: Vec<u8>,
    /// File backing the asset; None for bypassed requests.
    pub path: Option<PathBuf>,
    pub origin: AssetOrigin,
}

#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    cache_name: String,
    network_first_origin: String,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, config: &AssetCacheConfig) -> Self {
        Self {
            root: root.into(),
            cache_name: config.cache_name.clone(),
            network_first_origin: config.network_first_origin.clone(),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.cache_name)
    }

    pub fn strategy_for(&self, method: &str, url: &str) -> FetchStrategy {
        if !method.eq_ignore_ascii_case("GET") {
            FetchStrategy::Bypass
        } else if !self.network_first_origin.is_empty()
            && url.starts_with(&self.network_first_origin)
        {
            FetchStrategy::NetworkFirst
        } else {
            FetchStrategy::CacheFirst
        }
    }

    /// Fetches every URL and stores them all, or stores nothing if any
    /// one fails. Returns the number of cached entries.
    pub fn install(
        &self,
        urls: &[String],
        fetcher: &dyn AssetFetcher,
    ) -> Result<usize, AssetCacheError> {
        let mut fetched = Vec::with_capacity(urls.len());
        for url in urls {
            let asset = fetch_ok(fetcher, url)?;
            fetched.push((url, asset.bytes));
        }

        for (url, bytes) in &fetched {
            self.store(url, bytes)?;
        }

        tracing::info!(
            cache = %self.cache_name,
            entries = fetched.len(),
            "asset cache installed"
        );
        Ok(fetched.len())
    }

    /// Deletes every cache directory under the root except the live one.
    /// Returns the purged cache names.
    pub fn activate(&self) -> Result<Vec<String>, AssetCacheError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(&self.root, source)),
        };

        let mut purged = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| io_error(&self.root, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.cache_name || !entry.path().is_dir() {
                continue;
            }

            fs::remove_dir_all(entry.path()).map_err(|source| io_error(&entry.path(), source))?;
            tracing::info!(cache = %name, "deleted stale asset cache");
            purged.push(name);
        }

        Ok(purged)
    }

    pub fn fetch(
        &self,
        method: &str,
        url: &str,
        fetcher: &dyn AssetFetcher,
    ) -> Result<CachedAsset, AssetCacheError> {
        match self.strategy_for(method, url) {
            FetchStrategy::Bypass => {
                let asset = fetch_raw(fetcher, url)?;
                Ok(CachedAsset {
                    bytes: asset.bytes,
                    path: None,
                    origin: AssetOrigin::Network,
                })
            }
            FetchStrategy::NetworkFirst => match fetch_ok(fetcher, url) {
                Ok(asset) => self.store_network(url, asset.bytes),
                Err(error) => {
                    tracing::debug!(url, error = %error, "network-first fetch failed, trying cache");
                    self.lookup(url)?.ok_or(error)
                }
            },
            FetchStrategy::CacheFirst => {
                if let Some(hit) = self.lookup(url)? {
                    return Ok(hit);
                }
                let asset = fetch_raw(fetcher, url)?;
                if asset.status != HTTP_OK {
                    return Err(AssetCacheError::BadStatus {
                        url: url.to_owned(),
                        status: asset.status,
                    });
                }
                self.store_network(url, asset.bytes)
            }
        }
    }

    pub fn lookup(&self, url: &str) -> Result<Option<CachedAsset>, AssetCacheError> {
        let path = self.path_for(url);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(CachedAsset {
                bytes,
                path: Some(path),
                origin: AssetOrigin::Cache,
            })),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        self.cache_dir().join(URL_SAFE_NO_PAD.encode(url.as_bytes()))
    }

    fn store_network(&self, url: &str, bytes: Vec<u8>) -> Result<CachedAsset, AssetCacheError> {
        let path = self.store(url, &bytes)?;
        Ok(CachedAsset {
            bytes,
            path: Some(path),
            origin: AssetOrigin::Network,
        })
    }

    fn store(&self, url: &str, bytes: &[u8]) -> Result<PathBuf, AssetCacheError> {
        let dir = self.cache_dir();
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;

        let path = self.path_for(url);
        fs::write(&path, bytes).map_err(|source| io_error(&path, source))?;
        Ok(path)
    }
}

fn fetch_raw(fetcher: &dyn AssetFetcher, url: &str) -> Result<FetchedAsset, AssetCacheError> {
    fetcher.fetch(url).map_err(|error| AssetCacheError::Fetch {
        url: url.to_owned(),
        message: error.to_string(),
    })
}

fn fetch_ok(fetcher: &dyn AssetFetcher, url: &str) -> Result<FetchedAsset, AssetCacheError> {
    let asset = fetch_raw(fetcher, url)?;
    if asset.status != HTTP_OK {
        return Err(AssetCacheError::BadStatus {
            url: url.to_owned(),
            status: asset.status,
        });
    }
    Ok(asset)
}

fn io_error(path: &Path, source: std::io::Error) -> AssetCacheError {
    AssetCacheError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stubs::StaticFetcher;

    const AVATAR: &str = "https://picsum.photos/seed/Alex/100/100";
    const LOCAL: &str = "https://chat.local/icon.svg";

    fn cache(root: &Path) -> AssetCache {
        AssetCache::new(root, &AssetCacheConfig::default())
    }

    #[test]
    fn strategy_follows_method_and_origin() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());

        assert_eq!(cache.strategy_for("POST", LOCAL), FetchStrategy::Bypass);
        assert_eq!(cache.strategy_for("GET", AVATAR), FetchStrategy::NetworkFirst);
        assert_eq!(cache.strategy_for("get", LOCAL), FetchStrategy::CacheFirst);
    }

    #[test]
    fn cache_first_hits_network_once() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());
        let fetcher = StaticFetcher::default().with(LOCAL, 200, b"<svg/>");

        let first = cache.fetch("GET", LOCAL, &fetcher).expect("first fetch");
        let second = cache.fetch("GET", LOCAL, &fetcher).expect("second fetch");

        assert_eq!(first.origin, AssetOrigin::Network);
        assert_eq!(second.origin, AssetOrigin::Cache);
        assert_eq!(second.bytes, b"<svg/>");
        assert_eq!(fetcher.calls.borrow().len(), 1);
    }

    #[test]
    fn cache_first_does_not_store_non_ok_responses() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());
        let fetcher = StaticFetcher::default().with(LOCAL, 404, b"missing");

        let error = cache.fetch("GET", LOCAL, &fetcher).expect_err("404 must fail");

        assert!(matches!(error, AssetCacheError::BadStatus { status: 404, .. }));
        assert!(cache.lookup(LOCAL).expect("lookup").is_none());
    }

    #[test]
    fn network_first_falls_back_to_cache_when_offline() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());
        let online = StaticFetcher::default().with(AVATAR, 200, b"jpeg");
        cache.fetch("GET", AVATAR, &online).expect("online fetch");

        let offline = StaticFetcher::default();
        let asset = cache.fetch("GET", AVATAR, &offline).expect("cached fallback");

        assert_eq!(asset.origin, AssetOrigin::Cache);
        assert_eq!(asset.bytes, b"jpeg");
    }

    #[test]
    fn network_first_without_cache_reports_fetch_error() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());

        let error = cache
            .fetch("GET", AVATAR, &StaticFetcher::default())
            .expect_err("offline without cache must fail");

        assert!(matches!(error, AssetCacheError::Fetch { .. }));
    }

    #[test]
    fn install_is_all_or_nothing() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());
        let fetcher = StaticFetcher::default().with(LOCAL, 200, b"<svg/>");
        let urls = vec![LOCAL.to_owned(), "https://chat.local/missing".to_owned()];

        assert!(cache.install(&urls, &fetcher).is_err());
        assert!(cache.lookup(LOCAL).expect("lookup").is_none());

        let count = cache.install(&urls[..1], &fetcher).expect("install");
        assert_eq!(count, 1);
        assert!(cache.lookup(LOCAL).expect("lookup").is_some());
    }

    #[test]
    fn activate_purges_other_versions_only() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(root.path());
        fs::create_dir_all(root.path().join("localnet-chat-cache-v1")).expect("old cache");
        fs::create_dir_all(cache.cache_dir()).expect("live cache");

        let purged = cache.activate().expect("activate");

        assert_eq!(purged, vec!["localnet-chat-cache-v1".to_owned()]);
        assert!(cache.cache_dir().is_dir());
    }

    #[test]
    fn activate_tolerates_missing_root() {
        let root = tempfile::tempdir().expect("temp dir");
        let cache = cache(&root.path().join("absent"));

        assert!(cache.activate().expect("activate").is_empty());
    }
}
