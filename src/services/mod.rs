pub mod chart_service;
pub mod series_service;

pub use series_service::RateSeriesResolver;
