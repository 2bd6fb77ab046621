//! Authentication state plus the mutable Wi-Fi credentials.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    None,
    User,
    Admin,
}

impl Role {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// The shared Wi-Fi IP/password pair regular users log in with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub wifi_ip: String,
    pub user_password: String,
}

/// Holds credentials and the process-wide auth state.
///
/// Created once at startup from configuration. Only `save_settings`
/// touches the credentials; login and logout touch the auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    credentials: Credentials,
    admin_password: String,
    role: Role,
}

impl SessionStore {
    pub fn new(credentials: Credentials, admin_password: impl Into<String>) -> Self {
        Self {
            credentials,
            admin_password: admin_password.into(),
            role: Role::None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role != Role::None
    }

    /// Both inputs are trimmed before comparison. No lockout.
    pub fn login_as_user(&mut self, ip: &str, password: &str) -> bool {
        if ip.trim() == self.credentials.wifi_ip && password.trim() == self.credentials.user_password
        {
            self.role = Role::User;
            return true;
        }

        false
    }

    /// Exact comparison against the fixed admin password.
    pub fn login_as_admin(&mut self, password: &str) -> bool {
        if password == self.admin_password {
            self.role = Role::Admin;
            return true;
        }

        false
    }

    pub fn logout(&mut self) {
        self.role = Role::None;
    }

    /// Replaces the Wi-Fi credentials and forces a logout.
    pub fn save_settings(&mut self, wifi_ip: &str, user_password: &str) {
        self.credentials = Credentials {
            wifi_ip: wifi_ip.trim().to_owned(),
            user_password: user_password.trim().to_owned(),
        };
        self.logout();
    }
}
