use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};

use crate::infra::contracts::{AssetFetcher, ExternalOpener, FetchedAsset};

/// Records opened paths instead of launching a viewer.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    pub opened: RefCell<Vec<PathBuf>>,
}

impl ExternalOpener for RecordingOpener {
    fn open(&self, target: &Path) -> Result<()> {
        self.opened.borrow_mut().push(target.to_path_buf());
        Ok(())
    }
}

/// Serves canned responses; unknown URLs fail like an offline network.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pub responses: HashMap<String, FetchedAsset>,
    pub calls: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn with(mut self, url: &str, status: u16, bytes: &[u8]) -> Self {
        self.responses.insert(
            url.to_owned(),
            FetchedAsset {
                status,
                bytes: bytes.to_vec(),
            },
        );
        self
    }
}

impl AssetFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedAsset> {
        self.calls.borrow_mut().push(url.to_owned());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("network unreachable for {url}"))
    }
}
