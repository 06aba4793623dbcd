use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{ImageFormat, SeriesRequest};
use crate::services::chart_service;
use crate::state::AppState;

/// GET /{pair}/{date}[.svg|.png]
pub async fn rate_chart(
    State(state): State<Arc<AppState>>,
    Path((pair, date)): Path<(String, String)>,
) -> Result<Response, AppError> {
    info!("Chart request: pair={} date={}", pair, date);

    let Some((request, format)) = SeriesRequest::parse(&pair, &date) else {
        warn!("Invalid chart params: pair={} date={}", pair, date);
        return Err(AppError::NotFound);
    };

    let (series, _stats) = state.resolver.resolve(&request).await?;
    let spec = chart_service::chart_spec(&series);
    let (width, height) = (state.config.chart_width, state.config.chart_height);

    let body = tokio::task::spawn_blocking(move || match format {
        ImageFormat::Svg => chart_service::render_svg(&spec, width, height).map(String::into_bytes),
        ImageFormat::Png => chart_service::render_png(&spec, width, height),
    })
    .await
    .map_err(|e| AppError::Internal(format!("render task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
