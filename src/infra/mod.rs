//! Infrastructure layer: adapters for config, storage, and OS integrations.

pub mod asset_cache;
pub mod config;
pub mod connectivity;
pub mod contracts;
pub mod error;
pub mod http_fetcher;
pub mod logging;
pub mod opener;
pub mod secrets;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;
