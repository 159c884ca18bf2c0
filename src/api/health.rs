use axum::{extract::State, Json};
use serde::Serialize;

use crate::messaging::OutboxStats;
use crate::operation::OperationStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub transport: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub operations: OperationStatsSnapshot,
    pub directory: DirectoryCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbox: Option<OutboxStats>,
}

#[derive(Debug, Serialize)]
pub struct DirectoryCounts {
    pub sellers: usize,
    pub contractors: usize,
    pub employees: usize,
    pub statuses: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        transport: state.settings.notification.transport.clone(),
    })
}

/// GET /stats - operation counters, directory size and outbox counters
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let (sellers, contractors, employees, statuses) = state.directory.counts();

    Json(StatsResponse {
        operations: state.operation.stats(),
        directory: DirectoryCounts {
            sellers,
            contractors,
            employees,
            statuses,
        },
        outbox: state.outbox.as_ref().map(|outbox| outbox.stats()),
    })
}
