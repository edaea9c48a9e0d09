//! OpenRouter client for the inventory chat assistant.

mod client;
mod error;
mod types;

pub use client::AiClient;
pub use error::AiError;
