//! Single-line input field rendering, shared by every form.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::text_input::TextInput;

use super::styles;

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

pub struct InputField<'a> {
    pub title: &'a str,
    pub input: &'a TextInput,
    pub focused: bool,
    /// Shown when the field is empty and unfocused.
    pub placeholder: &'a str,
}

/// Renders a bordered input and places the cursor when focused.
pub fn render_input(frame: &mut Frame<'_>, area: Rect, field: InputField<'_>) {
    let border_style = if field.focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let paragraph = Paragraph::new(build_input_line(&field)).block(
        Block::default()
            .title(field.title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if field.focused {
        let before_cursor: String = field
            .input
            .display_text()
            .chars()
            .take(field.input.cursor())
            .collect();
        let offset = PROMPT_SYMBOL.len() + before_cursor.width();
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(offset.min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(field: &InputField<'_>) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if !field.focused && field.input.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(
                field.placeholder.to_owned(),
                styles::input_placeholder_style(),
            ),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(field.input.display_text(), styles::input_text_style()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "Press 'i' to type a message...";

    fn line_text(input: &TextInput, focused: bool) -> String {
        let field = InputField {
            title: "Message",
            input,
            focused,
            placeholder: PLACEHOLDER,
        };
        build_input_line(&field)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn shows_placeholder_when_empty_and_unfocused() {
        let text = line_text(&TextInput::field(), false);

        assert!(text.starts_with(PROMPT_SYMBOL));
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn shows_empty_prompt_when_focused() {
        let text = line_text(&TextInput::field(), true);

        assert_eq!(text, PROMPT_SYMBOL);
    }

    #[test]
    fn secret_input_is_masked() {
        let mut input = TextInput::secret();
        input.set_text("hunter2");

        let text = line_text(&input, false);

        assert!(!text.contains("hunter2"));
        assert!(!text.contains(PLACEHOLDER));
    }
}
