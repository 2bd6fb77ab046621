//! UI layer: terminal rendering and input for every screen.

mod admin_view;
mod chat_view;
mod event_source;
mod login_view;
mod message_input;
mod message_rendering;
pub mod shell;
mod styles;
mod terminal;
mod view;

pub(crate) use event_source::CrosstermEventSource;
pub(crate) use terminal::restore_terminal;
