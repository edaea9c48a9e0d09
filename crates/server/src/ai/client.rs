//! OpenRouter API client for chat completions.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::AiConfig;

use super::error::AiError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.3;
/// Upper bound on the provider call. On expiry the caller gets an error to
/// turn into a degraded response, never a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenRouter API client.
///
/// One attempt per call, no retries; failures surface immediately for the
/// chat handler to degrade on.
#[derive(Clone)]
pub struct AiClient {
    inner: Arc<AiClientInner>,
}

struct AiClientInner {
    client: reqwest::Client,
    model: String,
}

impl AiClient {
    /// Create a new OpenRouter client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &AiConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AiClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// Send one completion request and return the assistant's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, the provider
    /// answers non-200, or the response carries no message content.
    #[instrument(skip(self, system, user), fields(model = %self.inner.model))]
    pub async fn complete(&self, system: String, user: String) -> Result<String, AiError> {
        let request = ChatCompletionRequest {
            model: self.inner.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .inner
            .client
            .post(OPENROUTER_API_URL)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Api { status });
        }

        let body: ChatCompletionResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(AiError::MissingContent)
    }
}
