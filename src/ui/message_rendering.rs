//! Message list rendering logic.
//!
//! Handles visual formatting of a transcript:
//! - Time and sender on the first line of a group, text below
//! - Sender grouping (consecutive messages from one sender show the name once)
//! - Date separators between messages from different days
//! - Kind indicators such as `[Image]`

use chrono::{Local, NaiveDate};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::{directory::Directory, message::Message};

use super::styles;

const UNKNOWN_SENDER: &str = "Unknown";

/// Represents a visual element in the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// Date separator line (e.g., "——— 14 Feb 2026 ———").
    DateSeparator(String),
    Message {
        time: String,
        /// Present on the first message of a sender group.
        sender: Option<String>,
        own: bool,
        content: String,
    },
}

/// Builds visual elements for a transcript, naming senders through the
/// directory. The current user is shown as "You".
pub fn build_message_list_elements(
    messages: &[Message],
    directory: &Directory,
) -> Vec<MessageListElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_sender = None;

    for message in messages {
        let msg_date = message.timestamp.with_timezone(&Local).date_naive();

        if prev_date != Some(msg_date) {
            elements.push(MessageListElement::DateSeparator(format_date(msg_date)));
            prev_sender = None;
        }

        let own = &message.sender_id == directory.current_user_id();
        let sender = if prev_sender != Some(&message.sender_id) {
            Some(sender_name(message, directory, own))
        } else {
            None
        };

        elements.push(MessageListElement::Message {
            time: message.timestamp.with_timezone(&Local).format("%H:%M").to_string(),
            sender,
            own,
            content: message.display_content(),
        });

        prev_date = Some(msg_date);
        prev_sender = Some(&message.sender_id);
    }

    elements
}

fn sender_name(message: &Message, directory: &Directory, own: bool) -> String {
    if own {
        return "You".to_owned();
    }

    directory
        .user(&message.sender_id)
        .map(|user| user.name.clone())
        .unwrap_or_else(|| UNKNOWN_SENDER.to_owned())
}

/// Converts a list element to a ListItem for ratatui rendering.
pub fn element_to_list_item(element: &MessageListElement) -> ListItem<'static> {
    match element {
        MessageListElement::DateSeparator(date) => date_separator_item(date),
        MessageListElement::Message {
            time,
            sender,
            own,
            content,
        } => message_item(time, sender.as_deref(), *own, content),
    }
}

fn date_separator_item(date: &str) -> ListItem<'static> {
    let line = Line::from(vec![Span::styled(
        format!("——— {date} ———"),
        styles::date_separator_style(),
    )])
    .alignment(Alignment::Center);
    ListItem::new(vec![Line::default(), line, Line::default()])
}

fn message_item(time: &str, sender: Option<&str>, own: bool, content: &str) -> ListItem<'static> {
    let indent = "      ";
    let time_span = Span::styled(format!("{time:>5} "), styles::message_time_style());
    let mut lines = Vec::new();

    if let Some(name) = sender {
        let sender_style = if own {
            styles::own_sender_style()
        } else {
            styles::message_sender_style()
        };
        lines.push(Line::from(vec![
            time_span,
            Span::styled(format!("{name}:"), sender_style),
        ]));
        for text_line in content.lines() {
            let mut spans = vec![Span::raw(indent.to_owned())];
            spans.extend(build_content_line_spans(text_line));
            lines.push(Line::from(spans));
        }
    } else {
        let mut content_lines = content.lines();
        let mut first = vec![time_span];
        if let Some(first_line) = content_lines.next() {
            first.extend(build_content_line_spans(first_line));
        }
        lines.push(Line::from(first));

        for text_line in content_lines {
            let mut spans = vec![Span::raw(indent.to_owned())];
            spans.extend(build_content_line_spans(text_line));
            lines.push(Line::from(spans));
        }
    }

    ListItem::new(lines)
}

/// Highlights a leading `[Kind]` indicator.
fn build_content_line_spans(text: &str) -> Vec<Span<'static>> {
    if let Some(rest) = text.strip_prefix("[Image]") {
        let mut spans = vec![Span::styled(
            "[Image]".to_owned(),
            styles::message_media_style(),
        )];
        let rest = rest.trim_start();
        if !rest.is_empty() {
            spans.push(Span::raw(" ".to_owned()));
            spans.push(Span::styled(rest.to_owned(), styles::message_text_style()));
        }
        return spans;
    }

    vec![Span::styled(text.to_owned(), styles::message_text_style())]
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}
