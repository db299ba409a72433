use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// In-memory profile storage is used when absent.
    pub database_url: Option<String>,
    /// In-memory session storage is used when absent.
    pub redis_url: Option<String>,
    /// Chat and profile assessment are disabled when absent.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub chat_max_questions: u32,
    pub session_ttl_secs: u64,
    pub match_score_band: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            chat_max_questions: parse_env("CHAT_MAX_QUESTIONS", 3)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 86_400)?,
            match_score_band: parse_env("MATCH_SCORE_BAND", 2)?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
