use anyhow::{Context, Result};
use tokio::runtime::Handle;

use crate::infra::contracts::{AssetFetcher, FetchedAsset};

/// Blocking facade over an async reqwest client; the UI thread waits on
/// the shared runtime for the duration of one request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client, runtime: Handle) -> Self {
        Self { client, runtime }
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedAsset> {
        self.runtime.block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("request to {url} failed"))?;
            let status = response.status().as_u16();
            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("reading body of {url} failed"))?;

            Ok(FetchedAsset {
                status,
                bytes: bytes.to_vec(),
            })
        })
    }
}
