//! In-memory doubles for the cache and the rate API

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::coincheck::{ApiError, RateSource};
use crate::db::RateStore;
use crate::models::{Pair, SeriesKey};

/// HashMap-backed store that records every call
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
    pub batch_sizes: Mutex<Vec<usize>>,
    pub sets: AtomicUsize,
}

impl MemoryStore {
    pub fn insert(&self, pair: &str, time: &str, rate: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert((pair.to_string(), time.to_string()), rate.to_string());
    }

    pub fn get(&self, pair: &str, time: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(&(pair.to_string(), time.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn calls(&self) -> usize {
        self.batch_sizes.lock().unwrap().len() + self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn get_many(
        &self,
        keys: &[SeriesKey],
    ) -> Result<Vec<(SeriesKey, Option<String>)>, sqlx::Error> {
        self.batch_sizes.lock().unwrap().push(keys.len());
        Ok(keys
            .iter()
            .map(|key| (key.clone(), self.get(key.pair.as_str(), &key.time)))
            .collect())
    }

    async fn set(&self, key: &SeriesKey, rate: &str) -> Result<(), sqlx::Error> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.insert(key.pair.as_str(), &key.time, rate);
        Ok(())
    }
}

/// Rate API stub answering every lookup the same way
pub struct StubSource {
    rate: Option<String>,
    /// Fail with a server error on this call number (zero-based)
    fail_on: Option<usize>,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn returning(rate: Option<&str>) -> Self {
        Self {
            rate: rate.map(str::to_string),
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(rate: &str, call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::returning(Some(rate))
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for StubSource {
    async fn search_rate(&self, _pair: Pair, _time: &str) -> Result<Option<String>, ApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(call) {
            return Err(ApiError::ServerError(502, "bad gateway".to_string()));
        }
        Ok(self.rate.clone())
    }
}
