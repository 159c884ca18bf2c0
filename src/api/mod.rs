//! API layer - HTTP endpoint handlers.

mod health;
mod metrics;
mod operations;
mod outbox;
mod routes;

pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use operations::goods_return;
pub use outbox::{clear_outbox, list_outbox};
pub use routes::api_routes;
