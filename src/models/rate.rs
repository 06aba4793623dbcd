//! Rate samples, cache keys and the assembled series

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::Pair;
use crate::config::constants::LOCAL_OFFSET_HOURS;

/// Serialize an instant the way the rate API and the cache expect it
/// (`2024-01-30T15:00:00.000Z`).
pub fn iso_instant(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Short month/day label of an instant in the local calendar
pub fn local_day_label(time: &DateTime<Utc>) -> String {
    (*time + Duration::hours(LOCAL_OFFSET_HOURS))
        .format("%-m/%-d")
        .to_string()
}

/// Cache key: one entry per (pair, instant)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub pair: Pair,
    pub time: String,
}

impl SeriesKey {
    pub fn new(pair: Pair, time: &DateTime<Utc>) -> Self {
        Self {
            pair,
            time: iso_instant(time),
        }
    }
}

/// Resolution state of one candidate timestamp within a request.
/// A timestamp with no slot has not been looked at yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSlot {
    /// Found in the cache
    Cached(String),
    /// Looked up remotely and written to the cache
    Fetched(String),
    /// Looked up remotely, no rate returned; kept for this request only
    Unresolved,
}

impl RateSlot {
    pub fn rate(&self) -> Option<&str> {
        match self {
            RateSlot::Cached(rate) | RateSlot::Fetched(rate) => Some(rate),
            RateSlot::Unresolved => None,
        }
    }

    /// Numeric value for plotting; unresolved or unparseable rates are NaN
    pub fn value(&self) -> f64 {
        self.rate()
            .and_then(|rate| rate.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    }
}

/// One plotted sample
#[derive(Debug, Clone)]
pub struct SeriesPoint {
    pub time: String,
    pub label: String,
    pub rate: f64,
}

/// The 31-day series, oldest sample first
#[derive(Debug, Clone)]
pub struct RateSeries {
    pub pair: Pair,
    pub anchor_date: NaiveDate,
    pub points: Vec<SeriesPoint>,
}

/// Counters describing how a series was resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub cache_hits: usize,
    pub remote_lookups: usize,
    pub stored: usize,
    pub unresolved: usize,
    pub pauses: usize,
}
