//! Remote image generation: Imagen REST client and the async worker
//! that feeds results back into the shell.

pub mod client;
pub mod error;
pub mod worker;
