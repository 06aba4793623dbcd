//! Fixed policy constants for the rate chart service

use std::time::Duration;

/// Currency pairs the chart endpoint accepts
pub const SUPPORTED_PAIRS: [&str; 8] = [
    "btc_jpy",
    "etc_jpy",
    "lsk_jpy",
    "mona_jpy",
    "plt_jpy",
    "fnct_jpy",
    "dai_jpy",
    "wbtc_jpy",
];

/// Offset of the local calendar (JST) from UTC, in hours.
/// Candidate timestamps are the local midnight expressed as a UTC instant.
pub const LOCAL_OFFSET_HOURS: i64 = 9;

/// Number of daily samples in one chart (anchor day + 30 preceding days)
pub const WINDOW_DAYS: usize = 31;

/// Maximum number of keys sent in one cache multi-get
pub const CACHE_BATCH_SIZE: usize = 10;

/// A pause is taken after every `PACING_PERIOD`th candidate that hit the remote API
pub const PACING_PERIOD: usize = 5;

/// Length of each pacing pause
pub const PACING_DELAY: Duration = Duration::from_millis(500);

/// Filename-style suffixes stripped from the date path segment
pub const DATE_SUFFIXES: [&str; 2] = [".png", ".svg"];
