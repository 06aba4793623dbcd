use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::QueryBuilder;

use super::RateStore;
use crate::models::SeriesKey;

/// `RateStore` backed by the `rate_cache` table
#[derive(Clone)]
pub struct SqliteRateStore {
    pool: SqlitePool,
}

impl SqliteRateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[cfg(test)]
impl SqliteRateStore {
    /// Count cached entries for a pair
    pub async fn count_for_pair(&self, pair: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rate_cache WHERE pair = ?")
            .bind(pair)
            .fetch_one(&self.pool)
            .await
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    async fn get_many(
        &self,
        keys: &[SeriesKey],
    ) -> Result<Vec<(SeriesKey, Option<String>)>, sqlx::Error> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT pair, time, rate FROM rate_cache WHERE ");
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            query.push("(pair = ");
            query.push_bind(key.pair.as_str());
            query.push(" AND time = ");
            query.push_bind(key.time.clone());
            query.push(")");
        }

        let rows = query
            .build_query_as::<(String, String, String)>()
            .fetch_all(&self.pool)
            .await?;

        let mut found: HashMap<(String, String), String> = rows
            .into_iter()
            .map(|(pair, time, rate)| ((pair, time), rate))
            .collect();

        Ok(keys
            .iter()
            .map(|key| {
                let rate = found.remove(&(key.pair.as_str().to_string(), key.time.clone()));
                (key.clone(), rate)
            })
            .collect())
    }

    async fn set(&self, key: &SeriesKey, rate: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO rate_cache (pair, time, rate) VALUES (?, ?, ?) \
             ON CONFLICT(pair, time) DO UPDATE SET rate = excluded.rate",
        )
        .bind(key.pair.as_str())
        .bind(&key.time)
        .bind(rate)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
