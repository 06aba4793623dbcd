//! Data models for the rate chart service
//!
//! Request validation, cache keys, series and chart descriptions.

pub mod chart;
pub mod pair;
pub mod rate;
pub mod request;

pub use chart::{ChartSpec, ChartStyle};
pub use pair::Pair;
pub use rate::{
    iso_instant, local_day_label, RateSeries, RateSlot, ResolveStats, SeriesKey, SeriesPoint,
};
pub use request::{ImageFormat, SeriesRequest};
