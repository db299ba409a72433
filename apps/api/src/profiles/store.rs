//! Profile row storage: append and read everything, nothing else.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;

/// Append-only store of submitted profiles. Rows are never updated or deleted.
///
/// Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn append(&self, row: &ProfileRow) -> Result<(), AppError>;

    /// All rows in insertion order.
    async fn list_all(&self) -> Result<Vec<ProfileRow>, AppError>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn append(&self, row: &ProfileRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO profile_rows (user_id, submitted_at, data, score, feedback)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&row.user_id)
        .bind(row.submitted_at)
        .bind(&row.data)
        .bind(&row.score)
        .bind(&row.feedback)
        .execute(&self.pool)
        .await?;

        info!("Appended profile row for user {}", row.user_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, submitted_at, data, score, feedback FROM profile_rows ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

/// In-process store for tests and local runs without Postgres.
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: RwLock<Vec<ProfileRow>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn append(&self, row: &ProfileRow) -> Result<(), AppError> {
        self.rows.write().await.push(row.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ProfileRow>, AppError> {
        Ok(self.rows.read().await.clone())
    }
}
