//! Inventory chat handler.
//!
//! The endpoint never answers 5xx. A missing API key, a provider failure
//! and even a failed inventory read all degrade into a 200 with a fixed
//! fallback message and an `error` field, so the chat widget always has
//! something to render.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    db::{CategoryRepository, ProductRepository, RepositoryError},
    middleware::RequireAdminAuth,
    models::Category,
    services::chat_context,
    state::AppState,
};

/// Build the chat router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat reply. `error` is present only on degraded answers.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    fn answered(text: String) -> Self {
        Self {
            response: text,
            error: None,
        }
    }

    fn not_configured() -> Self {
        Self {
            response: "I apologize, but the chatbot is not configured. Please add \
                       OPENROUTER_API_KEY to your environment variables."
                .to_string(),
            error: Some("API key not found".to_string()),
        }
    }

    fn provider_failed(detail: String) -> Self {
        Self {
            response: "I'm having trouble connecting to the AI service. Please try again."
                .to_string(),
            error: Some(detail),
        }
    }

    fn internal_failure(detail: String) -> Self {
        Self {
            response: "I encountered an error processing your request. Please try again."
                .to_string(),
            error: Some(detail),
        }
    }
}

/// Answer an inventory question through the configured AI provider.
pub async fn chat(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatReply> {
    let Some(client) = state.ai() else {
        return Json(ChatReply::not_configured());
    };

    let context = match load_context(&state).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(error = %e, "chat inventory read failed");
            return Json(ChatReply::internal_failure(e.to_string()));
        }
    };

    match client
        .complete(chat_context::system_prompt(&context), body.message)
        .await
    {
        Ok(text) => Json(ChatReply::answered(text)),
        Err(e) => {
            tracing::error!(error = %e, "chat provider call failed");
            Json(ChatReply::provider_failed(e.to_string()))
        }
    }
}

/// Read live inventory and render the bounded context block.
async fn load_context(state: &AppState) -> Result<String, RepositoryError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let categories: Vec<Category> = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(chat_context::build_context(&products, &categories))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_answered_reply_omits_error_field() {
        let reply = ChatReply::answered("You have 3 products.".to_string());
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["response"], "You have 3 products.");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_not_configured_reply() {
        let reply = ChatReply::not_configured();
        assert!(reply.response.contains("OPENROUTER_API_KEY"));
        assert_eq!(reply.error.as_deref(), Some("API key not found"));
    }

    #[test]
    fn test_provider_failed_reply_carries_detail() {
        let reply = ChatReply::provider_failed("status 429".to_string());
        assert!(reply.response.contains("trouble connecting"));
        assert_eq!(reply.error.as_deref(), Some("status 429"));
    }

    #[test]
    fn test_internal_failure_reply() {
        let reply = ChatReply::internal_failure("database error".to_string());
        assert!(reply.response.contains("encountered an error"));
        assert!(reply.error.is_some());
    }
}
