//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    HTTP_REQUESTS_TOTAL, HTTP_REQUEST_LATENCY, NOTIFICATIONS_FAILED_TOTAL,
    NOTIFICATIONS_SENT_TOTAL, NOTIFICATIONS_SKIPPED_TOTAL, OPERATIONS_TOTAL, OPERATION_LATENCY,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Notification channel label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    EmployeeEmail,
    ClientEmail,
    ClientSms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::EmployeeEmail => "employee_email",
            Channel::ClientEmail => "client_email",
            Channel::ClientSms => "client_sms",
        }
    }
}

/// Helper struct for recording operation metrics
pub struct OperationMetrics;

impl OperationMetrics {
    /// Record an operation that reached dispatch
    pub fn record_completed() {
        OPERATIONS_TOTAL.with_label_values(&["completed"]).inc();
    }

    /// Record an aborted operation by error kind
    pub fn record_error(kind: &str) {
        OPERATIONS_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record operation latency
    pub fn observe_latency(seconds: f64) {
        OPERATION_LATENCY.observe(seconds);
    }
}

/// Helper struct for recording per-channel metrics
pub struct ChannelMetrics;

impl ChannelMetrics {
    pub fn record_sent(channel: Channel) {
        NOTIFICATIONS_SENT_TOTAL
            .with_label_values(&[channel.as_str()])
            .inc();
    }

    pub fn record_failed(channel: Channel) {
        NOTIFICATIONS_FAILED_TOTAL
            .with_label_values(&[channel.as_str()])
            .inc();
    }

    pub fn record_skipped(channel: Channel) {
        NOTIFICATIONS_SKIPPED_TOTAL
            .with_label_values(&[channel.as_str()])
            .inc();
    }
}

/// Helper struct for recording HTTP metrics
pub struct HttpMetrics;

impl HttpMetrics {
    /// Record a completed HTTP request
    pub fn record_request(method: &str, path: &str, status: u16, seconds: f64) {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        HTTP_REQUEST_LATENCY
            .with_label_values(&[method, path])
            .observe(seconds);
    }
}
