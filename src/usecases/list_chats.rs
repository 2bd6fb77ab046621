//! Chat listings: the current user's sidebar and the admin overview.

use crate::domain::{
    chat::{Chat, ChatId, ChatSummary},
    directory::Directory,
};

const UNKNOWN_USER: &str = "Unknown";

/// Current user's chats, most recent activity first. Chats without
/// messages keep insertion order after the rest.
pub fn chat_summaries(directory: &Directory) -> Vec<ChatSummary> {
    let viewer = directory.current_user_id();

    let mut summaries: Vec<ChatSummary> = directory
        .chats()
        .filter(|chat| chat.involves(viewer))
        .map(|chat| summarize(directory, chat))
        .collect();

    // Stable sort keeps insertion order among equal keys.
    summaries.sort_by(|a, b| b.last_message_unix_ms.cmp(&a.last_message_unix_ms));
    summaries
}

fn summarize(directory: &Directory, chat: &Chat) -> ChatSummary {
    let viewer = directory.current_user_id();
    let partner = chat.partner_of(viewer).and_then(|id| directory.user(id));
    let last = chat.last_message();

    ChatSummary {
        chat_id: chat.id().clone(),
        title: partner.map_or_else(|| UNKNOWN_USER.to_owned(), |user| user.name.clone()),
        last_message_preview: last.map(|message| message.display_content()),
        last_message_unix_ms: last.map(|message| message.timestamp_ms()),
        is_online: partner.is_some_and(|user| user.is_online),
        last_message_outgoing: last.is_some_and(|message| &message.sender_id == viewer),
    }
}

/// One row of the admin chat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminChatRow {
    pub chat_id: ChatId,
    pub participants: String,
    pub message_count: usize,
}

/// Every chat in insertion order, including ones the current user is
/// not part of.
pub fn admin_chat_rows(directory: &Directory) -> Vec<AdminChatRow> {
    directory
        .chats()
        .map(|chat| AdminChatRow {
            chat_id: chat.id().clone(),
            participants: participant_names(directory, chat),
            message_count: chat.messages().len(),
        })
        .collect()
}

pub fn participant_names(directory: &Directory, chat: &Chat) -> String {
    chat.participants()
        .iter()
        .map(|id| directory.user(id).map_or(UNKNOWN_USER, |user| user.name.as_str()))
        .collect::<Vec<_>>()
        .join(" & ")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::seed::demo_directory;

    #[test]
    fn sidebar_lists_only_viewer_chats_by_recency() {
        let directory = demo_directory(Utc::now());

        let titles: Vec<_> = chat_summaries(&directory)
            .into_iter()
            .map(|summary| summary.title)
            .collect();

        assert_eq!(titles, vec!["Alex", "Jess", "Sam"]);
    }

    #[test]
    fn summary_carries_partner_state_and_last_message() {
        let directory = demo_directory(Utc::now());

        let sam = chat_summaries(&directory)
            .into_iter()
            .find(|summary| summary.title == "Sam")
            .expect("sam chat");

        assert!(!sam.is_online);
        assert!(!sam.last_message_outgoing);
        assert_eq!(
            sam.last_message_preview.as_deref(),
            Some("did you finish the assignment?")
        );
    }

    #[test]
    fn empty_chats_sort_last() {
        let mut directory = demo_directory(Utc::now() - Duration::days(1));
        directory.add_user("Pat").expect("pat");

        let summaries = chat_summaries(&directory);

        let last = summaries.last().expect("rows");
        assert_eq!(last.title, "Pat");
        assert_eq!(last.last_message_preview, None);
    }

    #[test]
    fn admin_rows_cover_every_chat() {
        let directory = demo_directory(Utc::now());

        let rows = admin_chat_rows(&directory);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].participants, "Alex & Sam");
        assert_eq!(rows[3].message_count, 3);
        assert_eq!(rows[0].participants, "You & Alex");
    }
}
