use std::env;

use crate::api::coincheck::CoincheckClient;

pub mod constants;

/// Service configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub port: u16,
    /// sqlx connection string for the rate cache
    pub database_url: String,
    /// Origin of the exchange rate lookup API
    pub rate_api_base_url: String,
    pub chart_width: u32,
    pub chart_height: u32,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://rate_chart.db?mode=rwc";

    pub fn from_env() -> Self {
        Self {
            bind: env_str("RATE_CHART_BIND", "0.0.0.0"),
            port: env_u16("RATE_CHART_PORT", 8000),
            database_url: env_str("DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            rate_api_base_url: env_str("RATE_API_BASE_URL", CoincheckClient::DEFAULT_BASE_URL),
            chart_width: env_u32("RATE_CHART_WIDTH", 800),
            chart_height: env_u32("RATE_CHART_HEIGHT", 400),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            database_url: Self::DEFAULT_DATABASE_URL.to_string(),
            rate_api_base_url: CoincheckClient::DEFAULT_BASE_URL.to_string(),
            chart_width: 800,
            chart_height: 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_has_eight_unique_pairs() {
        let mut pairs = constants::SUPPORTED_PAIRS.to_vec();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), 8);
    }

    #[test]
    fn test_env_helpers_fall_back_when_unset() {
        assert_eq!(env_u16("RATE_CHART_TEST_UNSET_PORT", 1234), 1234);
        assert_eq!(env_str("RATE_CHART_TEST_UNSET_STR", "x"), "x");
        assert_eq!(env_u32("RATE_CHART_TEST_UNSET_W", 5), 5);
    }
}
