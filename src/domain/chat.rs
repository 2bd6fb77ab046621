use std::fmt;

use chrono::{DateTime, Utc};

use super::{
    message::{Message, MessageId, MessageKind},
    user::UserId,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two-party conversation with an append-only message log.
///
/// The participant pair is fixed at creation and always holds two
/// distinct ids. Messages are kept in append order, which is also
/// timestamp order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    id: ChatId,
    participants: [UserId; 2],
    messages: Vec<Message>,
}

impl Chat {
    /// Returns None when both participants are the same user.
    pub fn new(id: ChatId, first: UserId, second: UserId) -> Option<Self> {
        if first == second {
            return None;
        }

        Some(Self {
            id,
            participants: [first, second],
            messages: Vec::new(),
        })
    }

    pub fn id(&self) -> &ChatId {
        &self.id
    }

    pub fn participants(&self) -> &[UserId; 2] {
        &self.participants
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }

    /// The participant that is not `viewer`, if `viewer` takes part.
    pub fn partner_of(&self, viewer: &UserId) -> Option<&UserId> {
        if !self.involves(viewer) {
            return None;
        }

        self.participants.iter().find(|id| *id != viewer)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a message and returns it. The timestamp is raised to the
    /// previous last message's timestamp if the clock went backwards.
    pub(crate) fn append(
        &mut self,
        id: MessageId,
        sender_id: UserId,
        content: String,
        kind: MessageKind,
        at: DateTime<Utc>,
    ) -> &Message {
        let timestamp = match self.messages.last() {
            Some(last) if last.timestamp > at => last.timestamp,
            _ => at,
        };

        self.messages.push(Message {
            id,
            sender_id,
            content,
            timestamp,
            kind,
        });

        &self.messages[self.messages.len() - 1]
    }
}

/// Sidebar row for one chat, seen from the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    /// Partner display name.
    pub title: String,
    pub last_message_preview: Option<String>,
    pub last_message_unix_ms: Option<i64>,
    /// Whether the chat partner is online.
    pub is_online: bool,
    /// Whether the last message was sent by the viewer.
    pub last_message_outgoing: bool,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn chat() -> Chat {
        Chat::new(ChatId::new("chat1"), UserId::new("user1"), UserId::new("user2"))
            .expect("distinct participants")
    }

    #[test]
    fn rejects_chat_with_self() {
        assert!(Chat::new(ChatId::new("c"), UserId::new("u"), UserId::new("u")).is_none());
    }

    #[test]
    fn partner_of_returns_other_participant() {
        let chat = chat();

        assert_eq!(
            chat.partner_of(&UserId::new("user1")),
            Some(&UserId::new("user2"))
        );
        assert_eq!(chat.partner_of(&UserId::new("user3")), None);
    }

    #[test]
    fn append_keeps_order_and_clamps_timestamp() {
        let mut chat = chat();
        let now = Utc::now();

        chat.append(
            MessageId::new("msg1"),
            UserId::new("user1"),
            "first".to_owned(),
            MessageKind::Text,
            now,
        );
        let second = chat
            .append(
                MessageId::new("msg2"),
                UserId::new("user2"),
                "second".to_owned(),
                MessageKind::Text,
                now - Duration::seconds(30),
            )
            .clone();

        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0].content, "first");
        assert_eq!(second.timestamp, now);
        assert_eq!(chat.last_message().map(|m| m.id.to_string()).as_deref(), Some("msg2"));
    }
}
