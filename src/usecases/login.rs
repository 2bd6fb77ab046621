//! Login and logout workflows over the session store.

use thiserror::Error;

use crate::domain::session::SessionStore;

/// Login failure shown inline on the login screen. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Incorrect IP or Password. Get the deets from the admin!")]
    InvalidUserCredentials,
    #[error("Incorrect Admin Password.")]
    InvalidAdminPassword,
}

impl AuthFailure {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidUserCredentials => "AUTH_INVALID_USER_CREDENTIALS",
            Self::InvalidAdminPassword => "AUTH_INVALID_ADMIN_PASSWORD",
        }
    }
}

pub fn login_as_user(
    session: &mut SessionStore,
    wifi_ip: &str,
    password: &str,
) -> Result<(), AuthFailure> {
    if session.login_as_user(wifi_ip, password) {
        tracing::info!(role = session.role().as_label(), "login succeeded");
        return Ok(());
    }

    let failure = AuthFailure::InvalidUserCredentials;
    tracing::warn!(code = failure.code(), "user login rejected");
    Err(failure)
}

pub fn login_as_admin(session: &mut SessionStore, password: &str) -> Result<(), AuthFailure> {
    if session.login_as_admin(password) {
        tracing::info!(role = session.role().as_label(), "login succeeded");
        return Ok(());
    }

    let failure = AuthFailure::InvalidAdminPassword;
    tracing::warn!(code = failure.code(), "admin login rejected");
    Err(failure)
}

pub fn logout(session: &mut SessionStore) {
    if !session.is_authenticated() {
        tracing::debug!("logout ignored: not logged in");
        return;
    }

    let role = session.role();
    session.logout();
    tracing::info!(previous_role = role.as_label(), "logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{Credentials, Role};

    fn session() -> SessionStore {
        SessionStore::new(
            Credentials {
                wifi_ip: "192.168.1.1".to_owned(),
                user_password: "hostel-vibes".to_owned(),
            },
            "admin-password-123",
        )
    }

    #[test]
    fn user_login_with_matching_credentials_sets_user_role() {
        let mut session = session();

        login_as_user(&mut session, " 192.168.1.1 ", "hostel-vibes").expect("login");

        assert_eq!(session.role(), Role::User);
    }

    #[test]
    fn wrong_user_credentials_surface_inline_message() {
        let mut session = session();

        let failure = login_as_user(&mut session, "192.168.1.2", "hostel-vibes")
            .expect_err("wrong ip must fail");

        assert_eq!(
            failure.to_string(),
            "Incorrect IP or Password. Get the deets from the admin!"
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn wrong_admin_password_surfaces_inline_message() {
        let mut session = session();

        let failure = login_as_admin(&mut session, "hostel-vibes").expect_err("must fail");

        assert_eq!(failure.to_string(), "Incorrect Admin Password.");
        assert_eq!(session.role(), Role::None);
    }

    #[test]
    fn logout_resets_role() {
        let mut session = session();
        login_as_admin(&mut session, "admin-password-123").expect("admin login");

        logout(&mut session);

        assert_eq!(session.role(), Role::None);
    }
}
