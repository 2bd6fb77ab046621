use chrono::{Local, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{
    chat::ChatSummary,
    generation::GenerationState,
    shell_state::{ActivePane, ImagePrompt, ShellState},
    store::AppStore,
};

use super::{
    message_input::{render_input, InputField},
    message_rendering::{build_message_list_elements, element_to_list_item},
    styles,
    view::centered_rect,
};

const MODAL_WIDTH: u16 = 60;
const MODAL_HEIGHT: u16 = 9;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &ShellState, store: &AppStore) {
    let [chats_area, messages_with_input_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .areas(area);

    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(messages_with_input_area);

    let active_pane = state.chat.active_pane;
    render_chat_list_panel(frame, chats_area, state, active_pane);
    render_messages_panel(frame, messages_area, state, store);
    render_input(
        frame,
        input_area,
        InputField {
            title: "Message",
            input: &state.chat.message_input,
            focused: active_pane == ActivePane::MessageInput && state.chat.image_prompt.is_none(),
            placeholder: "Press 'i' to type a message...",
        },
    );

    if let Some(prompt) = &state.chat.image_prompt {
        render_image_modal(frame, area, prompt);
    }
}

fn render_chat_list_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &ShellState,
    active_pane: ActivePane,
) {
    let border_style = if active_pane == ActivePane::ChatList {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let chat_list = &state.chat.chat_list;
    if chat_list.is_empty() {
        let message = Paragraph::new("No chats yet. Ask the admin to add someone.").block(
            Block::default()
                .title("Chats")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(message, area);
        return;
    }

    let chats = chat_list.chats();
    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem<'static>> = chats
        .iter()
        .map(|chat| ListItem::new(chat_list_item_line(chat, inner_width)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Chats ({})", chats.len()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(styles::selection_style());

    let mut list_state = ListState::default();
    list_state.select(chat_list.selected_index());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn chat_list_item_line(chat: &ChatSummary, width: usize) -> Line<'static> {
    let timestamp = chat
        .last_message_unix_ms
        .map(format_chat_timestamp)
        .unwrap_or_else(|| "     ".to_owned());

    let raw_preview = chat
        .last_message_preview
        .as_deref()
        .map(normalize_preview_for_chat_row)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No messages yet".to_owned());

    let prefix = if chat.last_message_outgoing {
        "You: "
    } else {
        ""
    };
    let (indicator, indicator_style) = if chat.is_online {
        (" \u{25CF}", styles::online_indicator_style())
    } else {
        (" \u{25CB}", styles::offline_indicator_style())
    };

    // timestamp (5) + " | " (3) + name + space + prefix
    let used = 8 + chat.title.width() + 1 + prefix.width() + indicator.width();
    let available = width.saturating_sub(used);
    let (preview, padding) = fit_preview(&raw_preview, available);

    let mut spans = vec![
        Span::styled(format!("{timestamp:>5}"), styles::timestamp_style()),
        Span::styled(" | ", styles::separator_style()),
        Span::styled(chat.title.clone(), styles::chat_name_style()),
        Span::raw(" "),
    ];
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix, styles::chat_preview_style()));
    }
    spans.push(Span::styled(preview, styles::chat_preview_style()));
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.push(Span::styled(indicator, indicator_style));

    Line::from(spans)
}

/// Truncates with an ellipsis when the preview does not fit; returns the
/// text and the padding that right-aligns the indicator.
fn fit_preview(preview: &str, available: usize) -> (String, usize) {
    let chars: Vec<char> = preview.chars().collect();
    if chars.len() <= available {
        return (preview.to_owned(), available - chars.len());
    }

    let kept: String = chars.iter().take(available.saturating_sub(3)).collect();
    (format!("{kept}..."), 0)
}

fn format_chat_timestamp(timestamp_ms: i64) -> String {
    let datetime = match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(dt) => dt,
        chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => return "     ".to_owned(),
    };

    if datetime.date_naive() == Local::now().date_naive() {
        datetime.format("%H:%M").to_string()
    } else {
        datetime.format("%d.%m").to_string()
    }
}

fn normalize_preview_for_chat_row(preview: &str) -> String {
    preview.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_messages_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState, store: &AppStore) {
    let directory = &store.directory;
    let selected = state.chat.chat_list.selected_chat();
    let title = selected
        .map(|chat| format!("Messages — {}", chat.title))
        .unwrap_or_else(|| "Messages".to_owned());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::inactive_panel_border_style());

    let chat = selected.and_then(|summary| directory.chat(&summary.chat_id));
    let Some(chat) = chat else {
        frame.render_widget(
            Paragraph::new("Select a chat to view messages").block(block),
            area,
        );
        return;
    };

    if chat.messages().is_empty() {
        frame.render_widget(Paragraph::new("Say hi!").block(block), area);
        return;
    }

    let elements = build_message_list_elements(chat.messages(), directory);
    let items: Vec<ListItem<'static>> = elements.iter().map(element_to_list_item).collect();

    // Selecting the last element keeps the newest message in view.
    let mut list_state = ListState::default();
    list_state.select(Some(items.len().saturating_sub(1)));
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_image_modal(frame: &mut Frame<'_>, area: Rect, prompt: &ImagePrompt) {
    let area = centered_rect(area, MODAL_WIDTH, MODAL_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" AI Sticker ")
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [input_area, status_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);

    render_input(
        frame,
        input_area,
        InputField {
            title: "Prompt",
            input: &prompt.prompt,
            focused: !prompt.tracker.is_pending(),
            placeholder: "describe a sticker",
        },
    );

    frame.render_widget(
        Paragraph::new(generation_status_line(prompt.tracker.state())).wrap(Wrap { trim: true }),
        status_area,
    );
}

fn generation_status_line(state: &GenerationState) -> Line<'static> {
    match state {
        GenerationState::Idle => Line::from(Span::styled(
            "Enter: generate | Esc: close",
            styles::hint_style(),
        )),
        GenerationState::Pending { .. } => Line::from(Span::styled(
            "Generating...",
            styles::notice_style(),
        )),
        GenerationState::Ready(payload) => Line::from(vec![
            Span::styled(
                format!("Image ready ({} KB). ", payload.approx_len() / 1024),
                styles::online_indicator_style(),
            ),
            Span::styled("Enter: send | Esc: discard", styles::hint_style()),
        ]),
        GenerationState::Failed(message) => {
            Line::from(Span::styled(message.clone(), styles::error_style()))
        }
    }
}
