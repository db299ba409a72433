//! Session persistence between requests.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionState;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, AppError>;
    async fn save(&self, id: Uuid, state: &SessionState) -> Result<(), AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// Sessions as JSON strings under `onelove:session:{id}`, expiring after `ttl_secs`.
pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    fn key(id: Uuid) -> String {
        format!("onelove:session:{id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(Self::key(id)).await?;
        raw.map(|json| {
            serde_json::from_str(&json)
                .with_context(|| format!("Session {id} holds unreadable state"))
                .map_err(AppError::Internal)
        })
        .transpose()
    }

    async fn save(&self, id: Uuid, state: &SessionState) -> Result<(), AppError> {
        let json = serde_json::to_string(state).context("Failed to serialize session")?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(Self::key(id), json, self.ttl_secs)
            .await?;
        debug!("Saved session {id} on page {:?}", state.page);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(Self::key(id)).await?;
        Ok(())
    }
}

/// In-process sessions for tests and local runs without Redis. Never expire.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, AppError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn save(&self, id: Uuid, state: &SessionState) -> Result<(), AppError> {
        self.sessions.write().await.insert(id, state.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }
}
