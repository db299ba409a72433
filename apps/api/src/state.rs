use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::profiles::store::ProfileStore;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Append-only profile rows. Postgres, or in-memory without DATABASE_URL.
    pub profiles: Arc<dyn ProfileStore>,
    /// Per-user form sessions. Redis, or in-memory without REDIS_URL.
    pub sessions: Arc<dyn SessionStore>,
    /// Hosted chat model. `None` when no API key is configured; the chat page is
    /// then skipped and assessments fall back to the placeholder.
    pub chat_model: Option<Arc<dyn ChatModel>>,
    pub config: Config,
}

/// State over in-memory stores, for handler and service tests.
#[cfg(test)]
pub fn test_state(
    profiles: Arc<dyn ProfileStore>,
    chat_model: Option<Arc<dyn ChatModel>>,
) -> AppState {
    AppState {
        profiles,
        sessions: Arc::new(crate::session::store::MemorySessionStore::default()),
        chat_model,
        config: Config {
            database_url: None,
            redis_url: None,
            anthropic_api_key: None,
            port: 0,
            rust_log: "debug".to_string(),
            chat_max_questions: 3,
            session_ttl_secs: 60,
            match_score_band: 2,
        },
    }
}
