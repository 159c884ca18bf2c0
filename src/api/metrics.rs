//! Prometheus metrics endpoint.

use axum::{http::StatusCode, response::IntoResponse};

use crate::error::AppError;
use crate::metrics;

/// GET /metrics - Prometheus metrics endpoint
pub async fn prometheus_metrics() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(output) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        )
            .into_response(),
        Err(e) => AppError::Internal(format!("Failed to encode metrics: {}", e)).into_response(),
    }
}
