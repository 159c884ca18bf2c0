//! Outbound notification transports.
//!
//! # Transport Architecture
//!
//! Email and SMS delivery are abstracted behind two traits so the operation can be
//! wired to any gateway:
//!
//! - `MessagesClient`: sends rendered email messages
//! - `NotificationManager`: sends the client SMS and reports the outcome as data
//!
//! Two implementations ship with the service:
//!
//! - `OutboxTransport`: records every message in memory (default, inspectable via the API)
//! - `NoopTransport`: logs and drops messages
//!
//! Use `create_transport()` to build the configured one.

mod noop;
mod outbox;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NotificationConfig;
use crate::domain::{NotificationEvent, TemplateData};

pub use noop::NoopTransport;
pub use outbox::{
    OutboxEntry, OutboxMessage, OutboxStats, OutboxTransport, DEFAULT_OUTBOX_CAPACITY,
};

/// Errors returned by an email transport
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The gateway refused the message
    #[error("Message rejected: {0}")]
    Rejected(String),

    /// The gateway could not be reached
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub email_from: String,
    pub email_to: String,
    pub subject: String,
    pub message: String,
}

/// Outcome of an SMS attempt. Failures are reported here, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmsOutcome {
    pub sent: bool,
    pub error: Option<String>,
}

impl SmsOutcome {
    pub fn sent() -> Self {
        Self {
            sent: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sent: false,
            error: Some(error.into()),
        }
    }
}

/// Email transport
#[async_trait]
pub trait MessagesClient: Send + Sync {
    /// Send a batch of messages for a reseller.
    ///
    /// `client_id` and `target_status` are set for client-facing messages only.
    async fn send_messages(
        &self,
        messages: &[EmailMessage],
        reseller_id: i64,
        client_id: Option<i64>,
        event: NotificationEvent,
        target_status: Option<i64>,
    ) -> Result<(), MessagingError>;
}

/// SMS transport
#[async_trait]
pub trait NotificationManager: Send + Sync {
    async fn send(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        target_status: i64,
        template: &TemplateData,
    ) -> SmsOutcome;
}

/// Transports selected from configuration
pub struct Transports {
    pub messages: Arc<dyn MessagesClient>,
    pub sms: Arc<dyn NotificationManager>,
    /// Present when the outbox transport is in use
    pub outbox: Option<Arc<OutboxTransport>>,
}

/// Create the transports based on configuration.
///
/// - `"noop"`: `NoopTransport` for both channels
/// - `"outbox"` (default): a shared `OutboxTransport`
pub fn create_transport(settings: &NotificationConfig) -> Transports {
    match settings.transport.as_str() {
        "noop" => {
            tracing::info!(transport = "noop", "Creating noop transport");
            let noop = Arc::new(NoopTransport);
            Transports {
                messages: noop.clone(),
                sms: noop,
                outbox: None,
            }
        }
        other => {
            if other != "outbox" {
                tracing::warn!(
                    transport = %other,
                    "Unknown transport requested, falling back to outbox"
                );
            }
            tracing::info!(
                transport = "outbox",
                sms_enabled = settings.sms_enabled,
                capacity = settings.outbox_capacity,
                "Creating outbox transport"
            );
            let outbox = Arc::new(OutboxTransport::with_capacity(
                settings.sms_enabled,
                settings.outbox_capacity,
            ));
            Transports {
                messages: outbox.clone(),
                sms: outbox.clone(),
                outbox: Some(outbox),
            }
        }
    }
}
