//! Use case layer: application workflows and orchestration.

pub mod attachments;
pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod list_chats;
pub mod login;
pub mod manage_users;
pub mod open_image;
pub mod send_message;
pub mod settings;
pub mod shell;
