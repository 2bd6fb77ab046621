//! Use case for appending a text or image message to a chat.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    chat::ChatId,
    directory::Directory,
    generation::ImagePayload,
    message::{Message, MessageKind},
    messaging::{append_message, MessagingError},
    user::UserId,
};

/// Command to append a message to a specific chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub chat_id: ChatId,
    pub sender_id: UserId,
    pub content: String,
    pub kind: MessageKind,
}

impl SendMessageCommand {
    pub fn text(chat_id: ChatId, sender_id: UserId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender_id,
            content: text.into(),
            kind: MessageKind::Text,
        }
    }

    pub fn image(chat_id: ChatId, sender_id: UserId, payload: &ImagePayload) -> Self {
        Self {
            chat_id,
            sender_id,
            content: payload.data_uri(),
            kind: MessageKind::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// Content is empty after trimming whitespace.
    #[error("message is empty")]
    EmptyMessage,
    /// Image content is neither a `data:` URI nor an http(s) URL.
    #[error("image content is not a data URI or URL")]
    InvalidImage,
    #[error("chat {0} does not exist")]
    ChatNotFound(ChatId),
    #[error("sender {0} does not exist")]
    SenderNotFound(UserId),
    #[error("sender {sender} is not a participant of chat {chat}")]
    SenderNotParticipant { chat: ChatId, sender: UserId },
}

impl From<MessagingError> for SendMessageError {
    fn from(error: MessagingError) -> Self {
        match error {
            MessagingError::ChatNotFound(chat) => Self::ChatNotFound(chat),
            MessagingError::SenderNotFound(sender) => Self::SenderNotFound(sender),
            MessagingError::SenderNotParticipant { chat, sender } => {
                Self::SenderNotParticipant { chat, sender }
            }
        }
    }
}

/// Validates and appends a message, returning the stored copy.
///
/// Content is trimmed; empty content is rejected. The chat must exist
/// and the sender must be one of its two participants.
pub fn send_message(
    directory: &mut Directory,
    command: SendMessageCommand,
    at: DateTime<Utc>,
) -> Result<Message, SendMessageError> {
    let content = command.content.trim();
    if content.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }
    if command.kind == MessageKind::Image && !is_image_reference(content) {
        return Err(SendMessageError::InvalidImage);
    }

    let message = append_message(
        directory,
        &command.chat_id,
        &command.sender_id,
        content.to_owned(),
        command.kind,
        at,
    )?;

    tracing::info!(
        chat_id = %command.chat_id,
        message_id = %message.id,
        kind = ?message.kind,
        "message sent"
    );
    Ok(message)
}

fn is_image_reference(content: &str) -> bool {
    ImagePayload::parse_data_uri(content).is_some()
        || content.starts_with("https://")
        || content.starts_with("http://")
}
