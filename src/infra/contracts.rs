use std::path::Path;

use anyhow::Result;

/// Hands a file to the desktop's default viewer.
pub trait ExternalOpener {
    fn open(&self, target: &Path) -> Result<()>;
}

/// Raw HTTP response as the asset cache sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub status: u16,
    pub bytes: Vec<u8>,
}

/// Network side of the asset cache.
pub trait AssetFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedAsset>;
}
