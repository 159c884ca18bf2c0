use axum::{
    routing::{get, post},
    Router,
};

use crate::server::AppState;

use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::operations::goods_return;
use super::outbox::{clear_outbox, list_outbox};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health, Stats & Metrics
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        .nest(
            "/api/v1",
            Router::new()
                // Operations
                .route("/operations/goods-return", post(goods_return))
                // Outbox inspection
                .route("/outbox", get(list_outbox).delete(clear_outbox)),
        )
}
