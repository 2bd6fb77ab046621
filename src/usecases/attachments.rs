//! Local image files sent with `/img <path>`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::generation::ImagePayload;

const IMAGE_COMMAND: &str = "/img";
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("image is {size} bytes, limit is {max}")]
    TooLarge { size: u64, max: u64 },
}

/// Returns the path argument when `input` is an image command.
pub fn parse_image_command(input: &str) -> Option<&str> {
    let rest = input.trim().strip_prefix(IMAGE_COMMAND)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let path = rest.trim();
    (!path.is_empty()).then_some(path)
}

pub fn mime_type_for(path: &Path) -> Result<&'static str, AttachmentError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        _ => Err(AttachmentError::UnsupportedType(extension)),
    }
}

/// Reads an image file into a payload ready to send.
pub fn load_image_attachment(path: &Path) -> Result<ImagePayload, AttachmentError> {
    let mime_type = mime_type_for(path)?;
    let read_error = |source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(read_error)?.len();
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            size,
            max: MAX_ATTACHMENT_BYTES,
        });
    }

    let bytes = fs::read(path).map_err(read_error)?;
    tracing::debug!(bytes = bytes.len(), mime_type, "attachment loaded");
    Ok(ImagePayload::from_bytes(mime_type, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_command_path() {
        assert_eq!(parse_image_command("/img ~/cat.png"), Some("~/cat.png"));
        assert_eq!(parse_image_command("  /img   a b.jpg "), Some("a b.jpg"));
        assert_eq!(parse_image_command("/img"), None);
        assert_eq!(parse_image_command("/imgx a.png"), None);
        assert_eq!(parse_image_command("hello /img a.png"), None);
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_type_for(Path::new("a.PNG")).expect("png"), "image/png");
        assert_eq!(mime_type_for(Path::new("a.jpeg")).expect("jpeg"), "image/jpeg");
        assert!(matches!(
            mime_type_for(Path::new("notes.txt")),
            Err(AttachmentError::UnsupportedType(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn loads_file_into_data_uri() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sticker.png");
        fs::write(&path, b"\x89PNG").expect("fixture");

        let payload = load_image_attachment(&path).expect("payload");

        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.decode().expect("decode"), b"\x89PNG");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");

        let error = load_image_attachment(&dir.path().join("absent.png")).expect_err("must fail");

        assert!(matches!(error, AttachmentError::Read { .. }));
    }
}
