//! Domain services: pure logic layered between the repositories and the
//! HTTP handlers.

pub mod auth;
pub mod chat_context;
pub mod stats;
