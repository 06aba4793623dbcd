use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{ApiError, RateSearchResponse, RateValue};
use crate::models::Pair;

/// Historical rate lookup for a pair at an instant.
///
/// `Ok(None)` means the API answered but had no rate for that instant.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn search_rate(&self, pair: Pair, time: &str) -> Result<Option<String>, ApiError>;
}

/// Coincheck public API client for exchange rate history
pub struct CoincheckClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoincheckClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://coincheck.com";

    /// Create a new client against `base_url` (the public API, or a stub in tests)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/exchange/rates/search", self.base_url)
    }

    /// Map a non-success status to an error
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Rate API server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }
}

#[async_trait]
impl RateSource for CoincheckClient {
    /// GET /exchange/rates/search?pair={pair}&time={time}
    async fn search_rate(&self, pair: Pair, time: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .http_client
            .get(self.search_url())
            .query(&[("pair", pair.as_str()), ("time", time)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<RateSearchResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        Ok(body.rate.map(RateValue::into_string))
    }
}
