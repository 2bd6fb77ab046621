use chrono::Local;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::{
    domain::{
        admin_state::{AdminState, AdminTab, SettingsField},
        seed::NetworkLogEntry,
        store::AppStore,
        user::User,
    },
    usecases::{list_chats, manage_users},
};

use super::{
    message_input::{render_input, InputField},
    message_rendering::{build_message_list_elements, element_to_list_item},
    styles,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, admin: &AdminState, store: &AppStore) {
    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

    frame.render_widget(Paragraph::new(tab_line(admin.tab())), tabs_area);

    match admin.tab() {
        AdminTab::Settings => render_settings(frame, body_area, admin),
        AdminTab::Users => render_users(frame, body_area, admin, store),
        AdminTab::Chats => render_chats(frame, body_area, admin, store),
        AdminTab::NetworkLogs => render_network_logs(frame, body_area, admin.network_logs()),
    }
}

fn tab_line(active: AdminTab) -> Line<'static> {
    let mut spans = vec![Span::styled("Admin Panel  ", styles::chat_name_style())];
    for tab in AdminTab::ALL {
        let style = if tab == active {
            styles::tab_active_style()
        } else {
            styles::tab_inactive_style()
        };
        spans.push(Span::styled(tab.title(), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn render_settings(frame: &mut Frame<'_>, area: Rect, admin: &AdminState) {
    let [ip_area, password_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    render_input(
        frame,
        ip_area,
        InputField {
            title: "Wi-Fi IP",
            input: &admin.settings_ip,
            focused: admin.settings_focus() == SettingsField::WifiIp,
            placeholder: "",
        },
    );
    render_input(
        frame,
        password_area,
        InputField {
            title: "User Password",
            input: &admin.settings_password,
            focused: admin.settings_focus() == SettingsField::Password,
            placeholder: "",
        },
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Enter: save and log out everyone | Up/Down: switch field",
            styles::hint_style(),
        )),
        hint_area,
    );
}

fn render_users(frame: &mut Frame<'_>, area: Rect, admin: &AdminState, store: &AppStore) {
    let [list_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);

    let users = manage_users::manageable_users(&store.directory);
    let items: Vec<ListItem<'static>> = users.iter().map(user_item).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Users ({}) | Ctrl+D: delete", users.len()))
                .borders(Borders::ALL)
                .border_style(styles::inactive_panel_border_style()),
        )
        .highlight_style(styles::selection_style());

    let mut list_state = ListState::default();
    list_state.select((!users.is_empty()).then_some(admin.user_cursor()));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    render_input(
        frame,
        input_area,
        InputField {
            title: "Add user (Enter)",
            input: &admin.new_user_name,
            focused: true,
            placeholder: "name",
        },
    );
}

fn user_item(user: &User) -> ListItem<'static> {
    let (dot, style) = if user.is_online {
        ("\u{25CF} ", styles::online_indicator_style())
    } else {
        ("\u{25CB} ", styles::offline_indicator_style())
    };

    ListItem::new(Line::from(vec![
        Span::styled(dot, style),
        Span::styled(user.name.clone(), styles::chat_name_style()),
        Span::styled(format!("  ({})", user.id), styles::hint_style()),
    ]))
}

fn render_chats(frame: &mut Frame<'_>, area: Rect, admin: &AdminState, store: &AppStore) {
    let directory = &store.directory;

    if let Some(chat) = admin.viewing_chat().and_then(|id| directory.chat(id)) {
        let title = format!(
            "{} | Esc: back",
            list_chats::participant_names(directory, chat)
        );
        let elements = build_message_list_elements(chat.messages(), directory);
        let items: Vec<ListItem<'static>> = elements.iter().map(element_to_list_item).collect();
        let mut list_state = ListState::default();
        list_state.select(Some(items.len().saturating_sub(1)));
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(styles::active_panel_border_style()),
            )
            .highlight_style(Style::default());
        frame.render_stateful_widget(list, area, &mut list_state);
        return;
    }

    let rows = list_chats::admin_chat_rows(directory);
    let items: Vec<ListItem<'static>> = rows
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(row.participants.clone(), styles::chat_name_style()),
                Span::styled(
                    format!("  {} messages", row.message_count),
                    styles::chat_preview_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("All chats ({}) | Enter: view", rows.len()))
                .borders(Borders::ALL)
                .border_style(styles::inactive_panel_border_style()),
        )
        .highlight_style(styles::selection_style());

    let mut list_state = ListState::default();
    list_state.select((!rows.is_empty()).then_some(admin.chat_cursor()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_network_logs(frame: &mut Frame<'_>, area: Rect, logs: &[NetworkLogEntry]) {
    let items: Vec<ListItem<'static>> = logs
        .iter()
        .map(|entry| ListItem::new(network_log_line(entry)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Network Logs (simulated)")
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_widget(list, area);
}

fn network_log_line(entry: &NetworkLogEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            entry.at.with_timezone(&Local).format("%H:%M").to_string(),
            styles::timestamp_style(),
        ),
        Span::styled(" | ", styles::separator_style()),
        Span::styled(format!("{:<8}", entry.user), styles::chat_name_style()),
        Span::styled(entry.site, styles::chat_preview_style()),
    ])
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn tab_line_lists_every_tab() {
        let text = line_to_string(&tab_line(AdminTab::Users));

        for tab in AdminTab::ALL {
            assert!(text.contains(tab.title()));
        }
    }

    #[test]
    fn network_log_line_shows_user_and_site() {
        let entry = NetworkLogEntry {
            user: "Alex",
            site: "crates.io",
            at: Utc::now(),
        };

        let text = line_to_string(&network_log_line(&entry));

        assert!(text.contains("Alex"));
        assert!(text.contains("crates.io"));
    }
}
