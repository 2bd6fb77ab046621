use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::login_form::{LoginField, LoginForm, LoginMode};

use super::{
    message_input::{render_input, InputField},
    styles,
    view::centered_rect,
};

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &LoginForm) {
    let area = centered_rect(area, FORM_WIDTH, FORM_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" LocalNet Chat ")
        .borders(Borders::ALL)
        .border_style(styles::active_panel_border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, first_area, second_area, error_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(mode_tabs(form.mode())), tabs_area);

    match form.mode() {
        LoginMode::User => {
            render_input(
                frame,
                first_area,
                InputField {
                    title: "Wi-Fi IP",
                    input: &form.wifi_ip,
                    focused: form.focus() == LoginField::WifiIp,
                    placeholder: "e.g. 192.168.1.1",
                },
            );
            render_input(
                frame,
                second_area,
                InputField {
                    title: "Password",
                    input: &form.password,
                    focused: form.focus() == LoginField::Password,
                    placeholder: "ask the admin",
                },
            );
        }
        LoginMode::Admin => {
            render_input(
                frame,
                first_area,
                InputField {
                    title: "Admin Password",
                    input: &form.admin_password,
                    focused: true,
                    placeholder: "",
                },
            );
        }
    }

    if let Some(error) = form.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(error.to_owned(), styles::error_style())),
            error_area,
        );
    }
}

fn mode_tabs(mode: LoginMode) -> Line<'static> {
    let style_for = |tab: LoginMode| {
        if tab == mode {
            styles::tab_active_style()
        } else {
            styles::tab_inactive_style()
        }
    };

    Line::from(vec![
        Span::styled("User Login", style_for(LoginMode::User)),
        Span::raw("   "),
        Span::styled("Admin Login", style_for(LoginMode::Admin)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_mode_tab_is_highlighted() {
        let line = mode_tabs(LoginMode::Admin);

        assert_eq!(line.spans[0].style, styles::tab_inactive_style());
        assert_eq!(line.spans[2].style, styles::tab_active_style());
    }
}
