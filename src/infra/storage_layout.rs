use std::{fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "localnet-chat";

/// Where the client keeps logs, cached assets and opened images.
/// Nothing here holds chat state; that lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub log_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let cache_base = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve cache base directory".into(),
            })?;

        Ok(Self::under(cache_base.join(APP_DIR_NAME)))
    }

    pub fn under(root: PathBuf) -> Self {
        Self {
            log_dir: root.join("logs"),
            assets_dir: root.join("assets"),
            images_dir: root.join("images"),
        }
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.log_dir, &self.assets_dir, &self.images_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("localnet-chat.log")
    }
}
