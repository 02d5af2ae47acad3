pub mod user_accessor;

pub use user_accessor::*;

use crate::config::{redact_url, Settings};
use crate::utils::AppResult;
use sqlx::postgres::{PgPool, PgPoolOptions};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL,
    card_id TEXT NOT NULL
)";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(settings: &Settings) -> AppResult<Self> {
        log::info!("📊 Connecting to {}", redact_url(&settings.database_url));

        let pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .min_connections(settings.db_min_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .idle_timeout(settings.db_idle_timeout)
            .connect(&settings.database_url)
            .await?;

        let database = Self { pool };

        // Test connection
        database.ping().await?;

        if settings.db_ensure_schema {
            database.ensure_schema().await?;
        }

        Ok(database)
    }

    /// Creates the `users` table when it does not exist yet.
    async fn ensure_schema(&self) -> AppResult<()> {
        log::info!("🔧 Ensuring users table exists...");
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        log::info!("✅ Schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
