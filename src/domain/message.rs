use std::fmt;

use chrono::{DateTime, Utc};

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the message content holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    /// Literal text.
    #[default]
    Text,
    /// Image reference: a `data:` URI or a remote URL.
    Image,
}

impl MessageKind {
    /// Returns a display label for the kind, or None for plain text.
    pub fn display_label(&self) -> Option<&'static str> {
        match self {
            MessageKind::Text => None,
            MessageKind::Image => Some("[Image]"),
        }
    }
}

/// Immutable chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl Message {
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Returns the one-line display content. Image payloads are never
    /// printed verbatim, only their kind and size or origin.
    pub fn display_content(&self) -> String {
        match self.kind.display_label() {
            None => self.content.clone(),
            Some(label) => match image_size_label(&self.content) {
                Some(size) => format!("{label} {size}"),
                None => format!("{label} {}", self.content),
            },
        }
    }
}

/// Human size of a base64 `data:` URI payload, None for plain URLs.
fn image_size_label(content: &str) -> Option<String> {
    let (_, data) = content.strip_prefix("data:")?.split_once(";base64,")?;
    let bytes = data.len() / 4 * 3;

    Some(if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{} KB", bytes / 1024)
    } else {
        format!("{bytes} B")
    })
}
