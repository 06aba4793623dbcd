use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::models::SeriesKey;

pub mod rate_cache;

pub use rate_cache::SqliteRateStore;

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS rate_cache (
    pair TEXT NOT NULL,
    time TEXT NOT NULL,
    rate TEXT NOT NULL,
    date_created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (pair, time)
)
"#;

/// Persistent (pair, time) -> rate cache
#[async_trait]
pub trait RateStore: Send + Sync {
    /// One entry per requested key, in request order; `None` is a miss
    async fn get_many(
        &self,
        keys: &[SeriesKey],
    ) -> Result<Vec<(SeriesKey, Option<String>)>, sqlx::Error>;

    /// Insert or overwrite a single entry
    async fn set(&self, key: &SeriesKey, rate: &str) -> Result<(), sqlx::Error>;
}

/// Open the SQLite connection pool and create tables
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Every connection to `sqlite::memory:` is a separate database
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await?;

    create_tables(&pool).await?;

    Ok(pool)
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(CREATE_TABLES).execute(pool).await?;
    Ok(())
}
