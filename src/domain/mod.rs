//! Domain layer: core entities and business rules.

pub mod admin_state;
pub mod chat;
pub mod chat_list_state;
pub mod directory;
pub mod events;
pub mod generation;
pub mod login_form;
pub mod message;
pub mod messaging;
pub mod seed;
pub mod session;
pub mod shell_state;
pub mod store;
pub mod text_input;
pub mod user;
