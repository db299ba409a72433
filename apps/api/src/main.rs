mod chat;
mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod profiles;
mod questionnaire;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::{ChatModel, LlmClient};
use crate::profiles::store::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::routes::build_router;
use crate::session::store::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OneLove API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (profile rows)
    let profiles: Arc<dyn ProfileStore> = match &config.database_url {
        Some(url) => {
            let db = create_pool(url).await?;
            ensure_schema(&db).await?;
            Arc::new(PgProfileStore::new(db))
        }
        None => {
            warn!("DATABASE_URL not set: profile rows are kept in memory only");
            Arc::new(MemoryProfileStore::default())
        }
    };

    // Initialize Redis (sessions)
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let redis = redis::Client::open(url.as_str())?;
            info!(
                "Redis client initialized (session ttl: {}s)",
                config.session_ttl_secs
            );
            Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs))
        }
        None => {
            warn!("REDIS_URL not set: sessions are kept in memory only");
            Arc::new(MemorySessionStore::default())
        }
    };

    // Initialize LLM client, if configured
    let chat_model: Option<Arc<dyn ChatModel>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!(
                "LLM client initialized (model: {}, max questions: {})",
                llm_client::MODEL,
                config.chat_max_questions
            );
            Some(Arc::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set: chat page and profile assessment disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        profiles,
        sessions,
        chat_model,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the form front-end origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
