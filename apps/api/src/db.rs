use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Append-only table of submitted profiles.
/// No uniqueness on `user_id`: resubmissions add rows.
const PROFILE_ROWS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS profile_rows (
    id           BIGSERIAL PRIMARY KEY,
    user_id      TEXT NOT NULL,
    submitted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    data         JSONB NOT NULL,
    score        TEXT,
    feedback     TEXT
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the profile table when missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(PROFILE_ROWS_DDL).execute(pool).await?;
    info!("profile_rows table ready");
    Ok(())
}
