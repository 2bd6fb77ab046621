use chrono::Utc;

use super::{
    directory::Directory,
    seed,
    session::{Credentials, SessionStore},
};

/// The single process-wide store: session plus directory.
///
/// It is owned by the shell orchestrator and passed by reference to
/// every workflow; nothing lives in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppStore {
    pub session: SessionStore,
    pub directory: Directory,
}

impl AppStore {
    pub fn new(session: SessionStore, directory: Directory) -> Self {
        Self { session, directory }
    }

    /// Fresh session with the demo users and chats.
    pub fn init(credentials: Credentials, admin_password: &str) -> Self {
        Self::new(
            SessionStore::new(credentials, admin_password),
            seed::demo_directory(Utc::now()),
        )
    }
}
