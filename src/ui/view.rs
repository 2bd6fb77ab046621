use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{
    shell_state::{ActivePane, Screen, ShellState},
    store::AppStore,
};

use super::{admin_view, chat_view, login_view, styles};

pub fn render(frame: &mut Frame<'_>, state: &ShellState, store: &AppStore) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let screen = Screen::for_role(store.session.role());
    match screen {
        Screen::Login => login_view::render(frame, content_area, &state.login),
        Screen::Chat => chat_view::render(frame, content_area, state, store),
        Screen::Admin => admin_view::render(frame, content_area, &state.admin, store),
    }

    frame.render_widget(Paragraph::new(status_line(state, screen)), status_area);
}

/// Status bar: connectivity, then the notice if any, then key hints.
fn status_line(state: &ShellState, screen: Screen) -> Line<'static> {
    let connectivity = state.connectivity_status();
    let indicator_style = if connectivity.is_online() {
        styles::online_indicator_style()
    } else {
        styles::error_style()
    };

    let mut spans = vec![
        Span::styled("\u{25CF} ", indicator_style),
        Span::styled(connectivity.as_label().to_owned(), styles::hint_style()),
        Span::styled(" | ", styles::separator_style()),
    ];

    if let Some(notice) = state.chat.notice.as_deref().filter(|_| screen == Screen::Chat) {
        spans.push(Span::styled(notice.to_owned(), styles::notice_style()));
        spans.push(Span::styled(" | ", styles::separator_style()));
    }

    spans.push(Span::styled(key_hints(state, screen), styles::hint_style()));
    Line::from(spans)
}

fn key_hints(state: &ShellState, screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Tab: user/admin | Up/Down: field | Enter: connect | Ctrl+C: quit",
        Screen::Admin => "Tab: next tab | Ctrl+L: logout | Ctrl+C: quit",
        Screen::Chat if state.chat.image_prompt.is_some() => {
            "Enter: generate/send | Esc: cancel"
        }
        Screen::Chat => match state.chat.active_pane {
            ActivePane::ChatList => {
                "j/k: chats | i: type | g: AI sticker | o: open image | p: avatar | L: logout | q: quit"
            }
            ActivePane::MessageInput => "Enter: send (/img <path> attaches) | Esc: back",
        },
    }
}

/// A rectangle of the given size centered in `area`, clamped to it.
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
