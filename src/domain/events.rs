use super::generation::{ImagePayload, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    ConnectivityChanged(ConnectivityStatus),
    /// A generation request finished; the error side is user-facing text.
    ImageGenerated {
        request_id: RequestId,
        result: Result<ImagePayload, String>,
    },
}

/// A key press. Printable keys carry the character, special keys a
/// lowercase name such as `enter`, `esc`, `tab` or `backspace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ConnectivityStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Unknown => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }

    /// Unknown counts as online so the first probe does not block use.
    pub fn is_online(self) -> bool {
        self != Self::Offline
    }
}
