//! Prometheus metrics for the notification service.
//!
//! This module provides metrics for monitoring the goods return operation:
//! - Operation metrics (outcomes, latency)
//! - Channel metrics (sent, failed, skipped per notification channel)
//! - HTTP API metrics

mod helpers;

pub use helpers::{encode_metrics, Channel, ChannelMetrics, HttpMetrics, OperationMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Histogram,
    HistogramVec, IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "goods_return";

lazy_static! {
    // ============================================================================
    // Operation Metrics
    // ============================================================================

    /// Operations by outcome ("completed" or an error kind)
    pub static ref OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_operations_total", METRIC_PREFIX),
        "Total goods return operations by outcome",
        &["outcome"]
    ).unwrap();

    /// End-to-end operation latency
    pub static ref OPERATION_LATENCY: Histogram = register_histogram!(
        format!("{}_operation_latency_seconds", METRIC_PREFIX),
        "Goods return operation latency in seconds",
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    ).unwrap();

    // ============================================================================
    // Channel Metrics
    // ============================================================================

    /// Notifications sent by channel
    pub static ref NOTIFICATIONS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_sent_total", METRIC_PREFIX),
        "Total notifications accepted by the transport",
        &["channel"]
    ).unwrap();

    /// Notification failures by channel
    pub static ref NOTIFICATIONS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_failed_total", METRIC_PREFIX),
        "Total notifications rejected by the transport",
        &["channel"]
    ).unwrap();

    /// Channels skipped because a precondition was not met
    pub static ref NOTIFICATIONS_SKIPPED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_skipped_total", METRIC_PREFIX),
        "Total notification channels skipped",
        &["channel"]
    ).unwrap();

    // ============================================================================
    // HTTP API Metrics
    // ============================================================================

    /// HTTP request counter by method and path
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_http_requests_total", METRIC_PREFIX),
        "Total HTTP requests",
        &["method", "path", "status"]
    ).unwrap();

    /// HTTP request latency
    pub static ref HTTP_REQUEST_LATENCY: HistogramVec = register_histogram_vec!(
        format!("{}_http_request_latency_seconds", METRIC_PREFIX),
        "HTTP request latency in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).unwrap();
}
