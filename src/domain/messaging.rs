use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{
    chat::ChatId,
    directory::Directory,
    message::{Message, MessageKind},
    user::UserId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("chat {0} does not exist")]
    ChatNotFound(ChatId),
    #[error("sender {0} does not exist")]
    SenderNotFound(UserId),
    #[error("sender {sender} is not a participant of chat {chat}")]
    SenderNotParticipant { chat: ChatId, sender: UserId },
}

/// Appends a message to a chat's log.
///
/// The chat and the sender must exist and the sender must be one of the
/// two participants. Prior messages are never touched.
pub fn append_message(
    directory: &mut Directory,
    chat_id: &ChatId,
    sender_id: &UserId,
    content: String,
    kind: MessageKind,
    at: DateTime<Utc>,
) -> Result<Message, MessagingError> {
    if directory.user(sender_id).is_none() {
        return Err(MessagingError::SenderNotFound(sender_id.clone()));
    }

    let chat = directory
        .chat(chat_id)
        .ok_or_else(|| MessagingError::ChatNotFound(chat_id.clone()))?;
    if !chat.involves(sender_id) {
        return Err(MessagingError::SenderNotParticipant {
            chat: chat_id.clone(),
            sender: sender_id.clone(),
        });
    }

    let message_id = directory.allocate_message_id();
    let chat = directory
        .chat_mut(chat_id)
        .ok_or_else(|| MessagingError::ChatNotFound(chat_id.clone()))?;

    Ok(chat
        .append(message_id, sender_id.clone(), content, kind, at)
        .clone())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn setup() -> (Directory, ChatId, UserId, UserId) {
        let mut directory = Directory::new("You");
        let alex = directory.add_user("Alex").expect("alex").id;
        let chat = directory.chats().next().expect("chat").id().clone();
        let you = directory.current_user_id().clone();
        (directory, chat, you, alex)
    }

    #[test]
    fn appends_one_message_at_the_end() {
        let (mut directory, chat, you, alex) = setup();
        let now = Utc::now();

        append_message(&mut directory, &chat, &alex, "yo".into(), MessageKind::Text, now)
            .expect("first append");
        let message = append_message(
            &mut directory,
            &chat,
            &you,
            "hi".into(),
            MessageKind::Text,
            now,
        )
        .expect("second append");

        let log = directory.chat(&chat).expect("chat").messages();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1], message);
        assert_eq!(message.content, "hi");
        assert_eq!(message.sender_id, you);
        assert_eq!(message.kind, MessageKind::Text);
        assert!(message.timestamp >= log[0].timestamp);
    }

    #[test]
    fn message_ids_are_fresh() {
        let (mut directory, chat, you, _) = setup();
        let now = Utc::now();

        let first = append_message(&mut directory, &chat, &you, "a".into(), MessageKind::Text, now)
            .expect("append");
        let second =
            append_message(&mut directory, &chat, &you, "b".into(), MessageKind::Text, now)
                .expect("append");

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn timestamp_never_goes_backwards() {
        let (mut directory, chat, you, _) = setup();
        let now = Utc::now();

        append_message(&mut directory, &chat, &you, "a".into(), MessageKind::Text, now)
            .expect("append");
        let late = append_message(
            &mut directory,
            &chat,
            &you,
            "b".into(),
            MessageKind::Text,
            now - Duration::minutes(5),
        )
        .expect("append");

        assert_eq!(late.timestamp, now);
    }

    #[test]
    fn rejects_unknown_chat() {
        let (mut directory, _, you, _) = setup();

        let result = append_message(
            &mut directory,
            &ChatId::new("chat404"),
            &you,
            "hi".into(),
            MessageKind::Text,
            Utc::now(),
        );

        assert_eq!(result, Err(MessagingError::ChatNotFound(ChatId::new("chat404"))));
    }

    #[test]
    fn rejects_unknown_sender() {
        let (mut directory, chat, _, _) = setup();

        let result = append_message(
            &mut directory,
            &chat,
            &UserId::new("ghost"),
            "hi".into(),
            MessageKind::Text,
            Utc::now(),
        );

        assert_eq!(result, Err(MessagingError::SenderNotFound(UserId::new("ghost"))));
        assert!(directory.chat(&chat).expect("chat").messages().is_empty());
    }

    #[test]
    fn rejects_sender_outside_the_chat() {
        let (mut directory, chat, _, _) = setup();
        let sam = directory.add_user("Sam").expect("sam").id;

        let result = append_message(
            &mut directory,
            &chat,
            &sam,
            "hi".into(),
            MessageKind::Text,
            Utc::now(),
        );

        assert_eq!(
            result,
            Err(MessagingError::SenderNotParticipant {
                chat: chat.clone(),
                sender: sam,
            })
        );
    }
}
