use super::chat::{ChatId, ChatSummary};

/// Rendered sidebar rows plus the highlighted row.
///
/// The directory owns the active chat; this only mirrors it so the view
/// can find the row and j/k can find neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatListState {
    chats: Vec<ChatSummary>,
    selected_index: Option<usize>,
}

impl ChatListState {
    pub fn chats(&self) -> &[ChatSummary] {
        &self.chats
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_chat(&self) -> Option<&ChatSummary> {
        self.selected_index.and_then(|index| self.chats.get(index))
    }

    /// Replaces the rows and highlights `active` if it is listed.
    pub fn sync(&mut self, chats: Vec<ChatSummary>, active: Option<&ChatId>) {
        self.selected_index =
            active.and_then(|chat_id| chats.iter().position(|chat| &chat.chat_id == chat_id));
        self.chats = chats;
    }

    /// Chat below the highlighted one, or the first row when nothing is
    /// highlighted.
    pub fn next_chat_id(&self) -> Option<&ChatId> {
        let index = match self.selected_index {
            Some(index) => (index + 1).min(self.chats.len().saturating_sub(1)),
            None => 0,
        };
        self.chats.get(index).map(|chat| &chat.chat_id)
    }

    pub fn previous_chat_id(&self) -> Option<&ChatId> {
        let index = self.selected_index.map_or(0, |index| index.saturating_sub(1));
        self.chats.get(index).map(|chat| &chat.chat_id)
    }
}
