use super::text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    WifiIp,
    Password,
}

/// Login screen: two tabs, the user tab has two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    mode: LoginMode,
    focus: LoginField,
    pub wifi_ip: TextInput,
    pub password: TextInput,
    pub admin_password: TextInput,
    error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            mode: LoginMode::User,
            focus: LoginField::WifiIp,
            wifi_ip: TextInput::field(),
            password: TextInput::secret(),
            admin_password: TextInput::secret(),
            error: None,
        }
    }
}

impl LoginForm {
    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::User => LoginMode::Admin,
            LoginMode::Admin => LoginMode::User,
        };
        self.error = None;
    }

    pub fn toggle_field(&mut self) {
        self.focus = match self.focus {
            LoginField::WifiIp => LoginField::Password,
            LoginField::Password => LoginField::WifiIp,
        };
    }

    /// The field keystrokes go to in the current mode.
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match (self.mode, self.focus) {
            (LoginMode::Admin, _) => &mut self.admin_password,
            (LoginMode::User, LoginField::WifiIp) => &mut self.wifi_ip,
            (LoginMode::User, LoginField::Password) => &mut self.password,
        }
    }
}
