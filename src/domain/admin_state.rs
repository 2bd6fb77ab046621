use super::{
    chat::ChatId,
    seed::NetworkLogEntry,
    session::Credentials,
    text_input::TextInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Settings,
    Users,
    Chats,
    NetworkLogs,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [
        AdminTab::Settings,
        AdminTab::Users,
        AdminTab::Chats,
        AdminTab::NetworkLogs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::Users => "Users",
            Self::Chats => "Chats",
            Self::NetworkLogs => "Network Logs",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Settings => Self::Users,
            Self::Users => Self::Chats,
            Self::Chats => Self::NetworkLogs,
            Self::NetworkLogs => Self::Settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    WifiIp,
    Password,
}

/// Admin panel state: tabs, the settings form, the add-user field and
/// list cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    tab: AdminTab,
    settings_focus: SettingsField,
    pub settings_ip: TextInput,
    pub settings_password: TextInput,
    pub new_user_name: TextInput,
    user_cursor: usize,
    chat_cursor: usize,
    viewing_chat: Option<ChatId>,
    network_logs: Vec<NetworkLogEntry>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            tab: AdminTab::Settings,
            settings_focus: SettingsField::WifiIp,
            settings_ip: TextInput::field(),
            settings_password: TextInput::field(),
            new_user_name: TextInput::field(),
            user_cursor: 0,
            chat_cursor: 0,
            viewing_chat: None,
            network_logs: Vec::new(),
        }
    }
}

impl AdminState {
    /// Fresh panel with the settings form prefilled.
    pub fn open(credentials: &Credentials, network_logs: Vec<NetworkLogEntry>) -> Self {
        let mut state = Self {
            network_logs,
            ..Self::default()
        };
        state.settings_ip.set_text(&credentials.wifi_ip);
        state.settings_password.set_text(&credentials.user_password);
        state
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.viewing_chat = None;
    }

    pub fn settings_focus(&self) -> SettingsField {
        self.settings_focus
    }

    pub fn toggle_settings_field(&mut self) {
        self.settings_focus = match self.settings_focus {
            SettingsField::WifiIp => SettingsField::Password,
            SettingsField::Password => SettingsField::WifiIp,
        };
    }

    pub fn focused_settings_input_mut(&mut self) -> &mut TextInput {
        match self.settings_focus {
            SettingsField::WifiIp => &mut self.settings_ip,
            SettingsField::Password => &mut self.settings_password,
        }
    }

    pub fn user_cursor(&self) -> usize {
        self.user_cursor
    }

    pub fn chat_cursor(&self) -> usize {
        self.chat_cursor
    }

    /// Moves a list cursor by `delta` within `0..len`.
    pub fn move_user_cursor(&mut self, delta: isize, len: usize) {
        self.user_cursor = step(self.user_cursor, delta, len);
    }

    pub fn move_chat_cursor(&mut self, delta: isize, len: usize) {
        self.chat_cursor = step(self.chat_cursor, delta, len);
    }

    /// Re-clamps cursors after the underlying lists shrank.
    pub fn clamp_cursors(&mut self, users_len: usize, chats_len: usize) {
        self.user_cursor = self.user_cursor.min(users_len.saturating_sub(1));
        self.chat_cursor = self.chat_cursor.min(chats_len.saturating_sub(1));
    }

    pub fn viewing_chat(&self) -> Option<&ChatId> {
        self.viewing_chat.as_ref()
    }

    pub fn view_chat(&mut self, chat_id: ChatId) {
        self.viewing_chat = Some(chat_id);
    }

    pub fn close_chat_view(&mut self) {
        self.viewing_chat = None;
    }

    pub fn network_logs(&self) -> &[NetworkLogEntry] {
        &self.network_logs
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    current.saturating_add_signed(delta).min(len - 1)
}
