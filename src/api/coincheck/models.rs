use serde::{Deserialize, Serialize};

/// Rate value as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Text(String),
    Number(serde_json::Number),
}

impl RateValue {
    pub fn into_string(self) -> String {
        match self {
            RateValue::Text(s) => s,
            RateValue::Number(n) => n.to_string(),
        }
    }
}

/// Response from GET /exchange/rates/search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSearchResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub rate: Option<RateValue>,
}

/// Error type for rate API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 4xx and other non-success statuses
    HttpError(u16, String),
    /// 5xx Server Error
    ServerError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
