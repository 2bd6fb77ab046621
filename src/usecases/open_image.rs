//! Hands chat images and avatars to the system image viewer.
//!
//! Inline `data:` images are decoded into the images dir; remote URLs go
//! through the asset cache so they still open while offline.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    domain::{
        chat::Chat,
        directory::Directory,
        generation::ImagePayload,
        message::{Message, MessageKind},
    },
    infra::{
        asset_cache::{AssetCache, AssetCacheError},
        contracts::{AssetFetcher, ExternalOpener},
    },
};

#[derive(Debug, Error)]
pub enum OpenImageError {
    #[error("no chat is selected")]
    NoActiveChat,
    #[error("this chat has no images")]
    NoImage,
    #[error("image data is corrupt")]
    InvalidPayload,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Asset(#[from] AssetCacheError),
    #[error("failed to open image viewer: {0}")]
    Open(String),
}

/// Everything needed to materialize and open an image.
pub struct ImageAccess<'a> {
    pub images_dir: &'a Path,
    pub cache: &'a AssetCache,
    pub fetcher: &'a dyn AssetFetcher,
    pub opener: &'a dyn ExternalOpener,
}

pub fn latest_image(chat: &Chat) -> Option<&Message> {
    chat.messages()
        .iter()
        .rev()
        .find(|message| message.kind == MessageKind::Image)
}

/// Opens the newest image message in the active chat.
pub fn open_latest_image(
    directory: &Directory,
    access: &ImageAccess<'_>,
) -> Result<PathBuf, OpenImageError> {
    let chat = directory.active_chat().ok_or(OpenImageError::NoActiveChat)?;
    let message = latest_image(chat).ok_or(OpenImageError::NoImage)?;

    let path = match ImagePayload::parse_data_uri(&message.content) {
        Some(payload) => {
            let file_name = format!("{}.{}", message.id, payload.file_extension());
            write_payload(&payload, &access.images_dir.join(file_name))?
        }
        None => cached_path(&message.content, access)?,
    };

    open(access, &path)?;
    Ok(path)
}

/// Opens the active chat partner's avatar.
pub fn open_partner_avatar(
    directory: &Directory,
    access: &ImageAccess<'_>,
) -> Result<PathBuf, OpenImageError> {
    let chat = directory.active_chat().ok_or(OpenImageError::NoActiveChat)?;
    let partner = chat
        .partner_of(directory.current_user_id())
        .and_then(|id| directory.user(id))
        .ok_or(OpenImageError::NoActiveChat)?;

    let path = cached_path(&partner.avatar, access)?;
    open(access, &path)?;
    Ok(path)
}

/// Decodes a payload to `path`, creating parent directories.
pub fn write_payload(payload: &ImagePayload, path: &Path) -> Result<PathBuf, OpenImageError> {
    let bytes = payload
        .decode()
        .map_err(|_| OpenImageError::InvalidPayload)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OpenImageError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, bytes).map_err(|source| OpenImageError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn cached_path(url: &str, access: &ImageAccess<'_>) -> Result<PathBuf, OpenImageError> {
    let asset = access.cache.fetch("GET", url, access.fetcher)?;
    tracing::debug!(origin = ?asset.origin, "image asset resolved");

    asset.path.ok_or(OpenImageError::NoImage)
}

fn open(access: &ImageAccess<'_>, path: &Path) -> Result<(), OpenImageError> {
    access
        .opener
        .open(path)
        .map_err(|error| OpenImageError::Open(error.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        domain::{seed::demo_directory, user::placeholder_avatar},
        infra::{
            config::AssetCacheConfig,
            stubs::{RecordingOpener, StaticFetcher},
        },
        usecases::send_message::{send_message, SendMessageCommand},
    };

    struct Harness {
        _root: tempfile::TempDir,
        images_dir: PathBuf,
        cache: AssetCache,
        opener: RecordingOpener,
    }

    impl Harness {
        fn new() -> Self {
            let root = tempfile::tempdir().expect("temp dir");
            let images_dir = root.path().join("images");
            let cache = AssetCache::new(root.path().join("assets"), &AssetCacheConfig::default());

            Self {
                _root: root,
                images_dir,
                cache,
                opener: RecordingOpener::default(),
            }
        }

        fn access<'a>(&'a self, fetcher: &'a StaticFetcher) -> ImageAccess<'a> {
            ImageAccess {
                images_dir: &self.images_dir,
                cache: &self.cache,
                fetcher,
                opener: &self.opener,
            }
        }
    }

    #[test]
    fn data_uri_image_is_written_and_opened() {
        let harness = Harness::new();
        let fetcher = StaticFetcher::default();
        let mut directory = demo_directory(Utc::now());
        let chat = directory.active_chat_id().expect("active").clone();
        let you = directory.current_user_id().clone();
        let payload = ImagePayload::from_bytes("image/png", b"\x89PNG");
        send_message(
            &mut directory,
            SendMessageCommand::image(chat, you, &payload),
            Utc::now(),
        )
        .expect("image sent");

        let path = open_latest_image(&directory, &harness.access(&fetcher)).expect("opened");

        assert!(path.starts_with(&harness.images_dir));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("png"));
        assert_eq!(fs::read(&path).expect("file"), b"\x89PNG");
        assert_eq!(*harness.opener.opened.borrow(), vec![path]);
    }

    #[test]
    fn chat_without_images_reports_no_image() {
        let harness = Harness::new();
        let fetcher = StaticFetcher::default();
        let directory = demo_directory(Utc::now());

        let error = open_latest_image(&directory, &harness.access(&fetcher)).expect_err("none");

        assert!(matches!(error, OpenImageError::NoImage));
        assert!(harness.opener.opened.borrow().is_empty());
    }

    #[test]
    fn partner_avatar_goes_through_cache() {
        let harness = Harness::new();
        let avatar = placeholder_avatar("Alex");
        let fetcher = StaticFetcher::default().with(&avatar, 200, b"jpeg");
        let directory = demo_directory(Utc::now());

        let path = open_partner_avatar(&directory, &harness.access(&fetcher)).expect("opened");

        assert_eq!(path, harness.cache.path_for(&avatar));
        assert_eq!(harness.opener.opened.borrow().len(), 1);
    }

    #[test]
    fn offline_avatar_without_cache_fails() {
        let harness = Harness::new();
        let fetcher = StaticFetcher::default();
        let directory = demo_directory(Utc::now());

        let error = open_partner_avatar(&directory, &harness.access(&fetcher)).expect_err("fail");

        assert!(matches!(error, OpenImageError::Asset(_)));
    }
}
