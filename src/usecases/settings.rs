use crate::domain::session::SessionStore;

/// Stores new Wi-Fi credentials and ends the admin session, so the next
/// login must use them.
pub fn save_settings(session: &mut SessionStore, wifi_ip: &str, user_password: &str) {
    session.save_settings(wifi_ip, user_password);
    tracing::info!(
        wifi_ip = %session.credentials().wifi_ip,
        "network settings saved; session ended"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{Credentials, Role};

    #[test]
    fn saved_credentials_are_required_for_next_login() {
        let mut session = SessionStore::new(
            Credentials {
                wifi_ip: "192.168.1.1".to_owned(),
                user_password: "hostel-vibes".to_owned(),
            },
            "admin-password-123",
        );
        assert!(session.login_as_admin("admin-password-123"));

        save_settings(&mut session, " 10.0.0.7 ", " new-pass ");

        assert_eq!(session.role(), Role::None);
        assert!(!session.login_as_user("192.168.1.1", "hostel-vibes"));
        assert!(session.login_as_user("10.0.0.7", "new-pass"));
    }
}
