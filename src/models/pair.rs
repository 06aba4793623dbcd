//! Currency pair identifiers

use std::fmt;

use crate::config::constants::SUPPORTED_PAIRS;

/// A currency pair known to be on the allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair(&'static str);

impl Pair {
    /// Look up `raw` in the allow-list. Matching is exact (`BTC_JPY` is rejected).
    pub fn parse(raw: &str) -> Option<Self> {
        SUPPORTED_PAIRS
            .iter()
            .copied()
            .find(|supported| *supported == raw)
            .map(Pair)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
