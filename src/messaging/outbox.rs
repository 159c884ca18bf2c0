//! In-memory outbox transport.
//!
//! Every accepted email and SMS is appended to a bounded in-memory log that the HTTP
//! API exposes for inspection. When the log is full the oldest entry is evicted.
//! Entries are lost on restart.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{NotificationEvent, TemplateData};

use super::{EmailMessage, MessagesClient, MessagingError, NotificationManager, SmsOutcome};

/// Error reported for SMS attempts while the channel is switched off
const SMS_DISABLED_ERROR: &str = "SMS channel is disabled";

/// Entries kept when no capacity is configured
pub const DEFAULT_OUTBOX_CAPACITY: usize = 1000;

/// A recorded outbound message
#[derive(Debug, Clone, Serialize)]
pub struct OutboxEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub reseller_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    pub event: NotificationEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_status: Option<i64>,
    pub message: OutboxMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum OutboxMessage {
    Email(EmailMessage),
    Sms { payload: TemplateData },
}

/// Snapshot of outbox counters
#[derive(Debug, Clone, Serialize)]
pub struct OutboxStats {
    pub emails_recorded: u64,
    pub sms_recorded: u64,
    pub sms_rejected: u64,
    pub evicted: u64,
    pub capacity: usize,
}

pub struct OutboxTransport {
    entries: RwLock<VecDeque<OutboxEntry>>,
    capacity: usize,
    sms_enabled: bool,
    emails_recorded: AtomicU64,
    sms_recorded: AtomicU64,
    sms_rejected: AtomicU64,
    evicted: AtomicU64,
}

impl OutboxTransport {
    pub fn new(sms_enabled: bool) -> Self {
        Self::with_capacity(sms_enabled, DEFAULT_OUTBOX_CAPACITY)
    }

    /// Create an outbox holding at most `capacity` entries (minimum 1)
    pub fn with_capacity(sms_enabled: bool, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_OUTBOX_CAPACITY))),
            capacity,
            sms_enabled,
            emails_recorded: AtomicU64::new(0),
            sms_recorded: AtomicU64::new(0),
            sms_rejected: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
        }
    }

    /// All recorded entries, oldest first
    pub async fn entries(&self) -> Vec<OutboxEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    /// Recorded emails, oldest first
    pub async fn emails(&self) -> Vec<EmailMessage> {
        self.entries
            .read()
            .await
            .iter()
            .filter_map(|entry| match &entry.message {
                OutboxMessage::Email(email) => Some(email.clone()),
                OutboxMessage::Sms { .. } => None,
            })
            .collect()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub fn stats(&self) -> OutboxStats {
        OutboxStats {
            emails_recorded: self.emails_recorded.load(Ordering::Relaxed),
            sms_recorded: self.sms_recorded.load(Ordering::Relaxed),
            sms_rejected: self.sms_rejected.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            capacity: self.capacity,
        }
    }

    async fn record(&self, entry: OutboxEntry) {
        let mut entries = self.entries.write().await;
        while entries.len() >= self.capacity {
            if let Some(oldest) = entries.pop_front() {
                self.evicted.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(entry_id = %oldest.id, "Outbox full, evicted oldest entry");
            }
        }
        entries.push_back(entry);
    }
}

#[async_trait]
impl MessagesClient for OutboxTransport {
    async fn send_messages(
        &self,
        messages: &[EmailMessage],
        reseller_id: i64,
        client_id: Option<i64>,
        event: NotificationEvent,
        target_status: Option<i64>,
    ) -> Result<(), MessagingError> {
        if let Some(invalid) = messages.iter().find(|m| !m.email_to.contains('@')) {
            return Err(MessagingError::Rejected(format!(
                "invalid recipient address: {}",
                invalid.email_to
            )));
        }

        for message in messages {
            self.record(OutboxEntry {
                id: Uuid::new_v4(),
                recorded_at: Utc::now(),
                reseller_id,
                client_id,
                event,
                target_status,
                message: OutboxMessage::Email(message.clone()),
            })
            .await;
            self.emails_recorded.fetch_add(1, Ordering::Relaxed);

            tracing::debug!(
                to = %message.email_to,
                reseller_id = reseller_id,
                event = %event,
                "Email recorded in outbox"
            );
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationManager for OutboxTransport {
    async fn send(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        target_status: i64,
        template: &TemplateData,
    ) -> SmsOutcome {
        if !self.sms_enabled {
            self.sms_rejected.fetch_add(1, Ordering::Relaxed);
            return SmsOutcome::failed(SMS_DISABLED_ERROR);
        }

        self.record(OutboxEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            reseller_id,
            client_id: Some(client_id),
            event,
            target_status: Some(target_status),
            message: OutboxMessage::Sms {
                payload: template.clone(),
            },
        })
        .await;
        self.sms_recorded.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            reseller_id = reseller_id,
            client_id = client_id,
            target_status = target_status,
            "SMS recorded in outbox"
        );

        SmsOutcome::sent()
    }
}
