//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{ai::AiClient, config::Config};

/// Application state shared across all handlers.
///
/// One pool and one AI client are constructed at process start and handed
/// to every request by cheap clone; repositories borrow the pool per call.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pool: PgPool,
    ai_client: Option<AiClient>,
}

impl AppState {
    /// Build the application state. The AI client exists only when an API
    /// key is configured; the chat endpoint degrades without it.
    #[must_use]
    pub fn new(config: Config, pool: PgPool) -> Self {
        let ai_client = config.ai.as_ref().map(AiClient::new);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                ai_client,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Shared database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// AI client, if an API key was configured.
    #[must_use]
    pub fn ai(&self) -> Option<&AiClient> {
        self.inner.ai_client.as_ref()
    }
}
