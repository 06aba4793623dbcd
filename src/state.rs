use std::sync::Arc;

use crate::api::coincheck::RateSource;
use crate::config::AppConfig;
use crate::db::RateStore;
use crate::services::RateSeriesResolver;

/// Shared application state, passed to route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: AppConfig,
    pub resolver: RateSeriesResolver,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RateStore>,
        source: Arc<dyn RateSource>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            resolver: RateSeriesResolver::new(store, source),
        })
    }
}
