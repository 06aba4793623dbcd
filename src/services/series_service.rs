use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::{debug, error, info};

use crate::api::coincheck::{ApiError, RateSource};
use crate::config::constants::{CACHE_BATCH_SIZE, PACING_DELAY, PACING_PERIOD};
use crate::db::RateStore;
use crate::models::{
    local_day_label, RateSeries, RateSlot, ResolveStats, SeriesKey, SeriesPoint, SeriesRequest,
};
use crate::utils::Pacer;

#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("rate API lookup failed: {0}")]
    Upstream(#[from] ApiError),
    #[error("rate cache error: {0}")]
    Cache(#[from] sqlx::Error),
}

/// Builds the 31-day rate series for a request, cache first,
/// filling gaps from the rate API and writing new rates back.
#[derive(Clone)]
pub struct RateSeriesResolver {
    store: Arc<dyn RateStore>,
    source: Arc<dyn RateSource>,
    pacing_delay: Duration,
}

impl RateSeriesResolver {
    pub fn new(store: Arc<dyn RateStore>, source: Arc<dyn RateSource>) -> Self {
        Self {
            store,
            source,
            pacing_delay: PACING_DELAY,
        }
    }

    /// Override the pause length between API bursts (tests run with zero)
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    pub async fn resolve(
        &self,
        request: &SeriesRequest,
    ) -> Result<(RateSeries, ResolveStats), SeriesError> {
        let times = request.candidate_times();
        let keys: Vec<SeriesKey> = times
            .iter()
            .map(|time| SeriesKey::new(request.pair, time))
            .collect();

        let mut slots = self.load_cached(&keys).await?;
        let mut stats = ResolveStats {
            cache_hits: slots.len(),
            ..ResolveStats::default()
        };
        let mut pacer = Pacer::with_policy(PACING_PERIOD, self.pacing_delay);

        // Sequential on purpose: one outstanding API call at a time
        for (i, key) in keys.iter().enumerate() {
            if slots.contains_key(&key.time) {
                continue;
            }

            let rate = self
                .source
                .search_rate(key.pair, &key.time)
                .await
                .map_err(|e| {
                    error!("Rate lookup failed for {} at {}: {}", key.pair, key.time, e);
                    e
                })?;
            stats.remote_lookups += 1;
            info!("Rate API: {} {} -> {:?}", key.pair, key.time, rate);

            let slot = match rate {
                Some(rate) => {
                    self.store.set(key, &rate).await?;
                    stats.stored += 1;
                    RateSlot::Fetched(rate)
                }
                None => {
                    stats.unresolved += 1;
                    RateSlot::Unresolved
                }
            };
            slots.insert(key.time.clone(), slot);

            pacer.after_lookup(i).await;
        }
        stats.pauses = pacer.pauses();

        let points = times
            .iter()
            .zip(&keys)
            .rev()
            .map(|(time, key)| SeriesPoint {
                time: key.time.clone(),
                label: local_day_label(time),
                rate: slots.get(&key.time).map_or(f64::NAN, RateSlot::value),
            })
            .collect();

        info!(
            "Resolved {} ({}): {} cached, {} fetched, {} stored, {} unresolved, {} pauses",
            request.pair,
            request.anchor_date(),
            stats.cache_hits,
            stats.remote_lookups,
            stats.stored,
            stats.unresolved,
            stats.pauses
        );

        let series = RateSeries {
            pair: request.pair,
            anchor_date: request.anchor_date(),
            points,
        };

        Ok((series, stats))
    }

    /// Multi-get all keys in concurrent batches; misses are dropped
    async fn load_cached(
        &self,
        keys: &[SeriesKey],
    ) -> Result<HashMap<String, RateSlot>, sqlx::Error> {
        let batches = keys
            .chunks(CACHE_BATCH_SIZE)
            .map(|batch| self.store.get_many(batch));
        let results = try_join_all(batches).await?;

        let cached: HashMap<String, RateSlot> = results
            .into_iter()
            .flatten()
            .filter_map(|(key, rate)| rate.map(|rate| (key.time, RateSlot::Cached(rate))))
            .collect();
        debug!("Cache: {} of {} candidates present", cached.len(), keys.len());

        Ok(cached)
    }
}
