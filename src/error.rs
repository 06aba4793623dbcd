use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::services::chart_service::ChartError;
use crate::services::series_service::SeriesError;

/// Error type for chart endpoint responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unsupported pair or unparseable date
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("internal_error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            other => {
                tracing::error!("Chart request failed: {}", other);
                let body = json!({ "error": other.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::coincheck::ApiError;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);

        let upstream = AppError::from(SeriesError::Upstream(ApiError::RequestError("boom".into())));
        assert_eq!(upstream.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
