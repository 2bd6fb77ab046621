use super::{
    admin_state::AdminState,
    session::Role,
    chat_list_state::ChatListState,
    events::ConnectivityStatus,
    generation::{GenerationTracker, RequestIds},
    login_form::LoginForm,
    text_input::TextInput,
};

/// Which screen is shown; follows the session role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Chat,
    Admin,
}

impl Screen {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::None => Self::Login,
            Role::User => Self::Chat,
            Role::Admin => Self::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePane {
    #[default]
    ChatList,
    MessageInput,
}

/// The AI image modal: prompt field plus the request it waits on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePrompt {
    pub prompt: TextInput,
    pub tracker: GenerationTracker,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatScreenState {
    pub active_pane: ActivePane,
    pub chat_list: ChatListState,
    pub message_input: TextInput,
    pub image_prompt: Option<ImagePrompt>,
    /// One-line feedback shown in the status bar until the next key.
    pub notice: Option<String>,
}

/// Presentation state for all screens. Which screen shows is derived
/// from the session role, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    connectivity_status: ConnectivityStatus,
    pub login: LoginForm,
    pub chat: ChatScreenState,
    pub admin: AdminState,
    /// Outlives modals and logouts so a late result never matches a newer
    /// request.
    pub request_ids: RequestIds,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            connectivity_status: ConnectivityStatus::Unknown,
            login: LoginForm::default(),
            chat: ChatScreenState::default(),
            admin: AdminState::default(),
            request_ids: RequestIds::default(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn connectivity_status(&self) -> ConnectivityStatus {
        self.connectivity_status
    }

    pub fn set_connectivity_status(&mut self, status: ConnectivityStatus) {
        self.connectivity_status = status;
    }

    /// Drops every per-session screen state; used on logout.
    pub fn reset_screens(&mut self) {
        self.login = LoginForm::default();
        self.chat = ChatScreenState::default();
        self.admin = AdminState::default();
    }
}
