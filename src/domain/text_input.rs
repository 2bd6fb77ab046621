//! Editable single-line text field shared by every form in the shell.

/// Message body limit.
pub const MESSAGE_MAX_LENGTH: usize = 4096;

/// Limit for short form fields (IP, passwords, names).
pub const FIELD_MAX_LENGTH: usize = 128;

const MASK_CHAR: char = '•';

/// Text plus a cursor counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    max_length: usize,
    masked: bool,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new(MESSAGE_MAX_LENGTH)
    }
}

impl TextInput {
    pub fn new(max_length: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_length,
            masked: false,
        }
    }

    pub fn field() -> Self {
        Self::new(FIELD_MAX_LENGTH)
    }

    /// A field whose display text hides every character.
    pub fn secret() -> Self {
        Self {
            masked: true,
            ..Self::field()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the UI may print: the text, or one mask char per character.
    pub fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.text.chars().count())
        } else {
            self.text.clone()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(self.max_length).collect();
        self.cursor = self.text.chars().count();
    }

    /// Returns the content and leaves the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Applies one editing key. Returns false when the key is not an
    /// editing key or the edit was refused.
    pub fn apply_key(&mut self, key: &str) -> bool {
        match key {
            "backspace" => self.delete_before(),
            "delete" => self.delete_at(),
            "left" => self.cursor = self.cursor.saturating_sub(1),
            "right" => self.cursor = (self.cursor + 1).min(self.len()),
            "home" => self.cursor = 0,
            "end" => self.cursor = self.len(),
            other => {
                let mut chars = other.chars();
                return match (chars.next(), chars.next()) {
                    (Some(ch), None) => self.insert(ch),
                    _ => false,
                };
            }
        }

        true
    }

    pub fn insert(&mut self, ch: char) -> bool {
        if ch.is_control() || self.len() >= self.max_length {
            return false;
        }

        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        true
    }

    fn delete_before(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        self.remove_at_cursor();
    }

    fn delete_at(&mut self) {
        if self.cursor < self.len() {
            self.remove_at_cursor();
        }
    }

    fn remove_at_cursor(&mut self) {
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.drain(start..end);
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
