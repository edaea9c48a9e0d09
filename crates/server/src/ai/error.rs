//! Error types for the OpenRouter client.

use thiserror::Error;

/// Errors from the external AI provider call.
///
/// The chat handler converts every variant into a degraded 200 response;
/// none of these ever becomes an HTTP error toward the caller.
#[derive(Debug, Error)]
pub enum AiError {
    /// Request failed at the transport level (includes the 30s timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("OpenRouter API error: {status}")]
    Api {
        /// HTTP status the provider returned.
        status: reqwest::StatusCode,
    },

    /// Provider answered 200 but without a message to relay.
    #[error("response contained no message content")]
    MissingContent,
}
