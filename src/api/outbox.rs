//! Outbox inspection endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::messaging::{OutboxEntry, OutboxTransport};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct OutboxResponse {
    pub entries: Vec<OutboxEntry>,
    pub total: usize,
}

fn outbox(state: &AppState) -> Result<&OutboxTransport> {
    state
        .outbox
        .as_deref()
        .ok_or_else(|| AppError::NotFound("Outbox is not enabled for this transport".to_string()))
}

/// GET /api/v1/outbox
pub async fn list_outbox(State(state): State<AppState>) -> Result<Json<OutboxResponse>> {
    let entries = outbox(&state)?.entries().await;
    let total = entries.len();
    Ok(Json(OutboxResponse { entries, total }))
}

/// DELETE /api/v1/outbox
pub async fn clear_outbox(State(state): State<AppState>) -> Result<StatusCode> {
    outbox(&state)?.clear().await;
    Ok(StatusCode::NO_CONTENT)
}
