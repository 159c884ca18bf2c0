//! Noop transport: logs messages without delivering them.

use async_trait::async_trait;

use crate::domain::{NotificationEvent, TemplateData};

use super::{EmailMessage, MessagesClient, MessagingError, NotificationManager, SmsOutcome};

#[derive(Debug, Clone, Default)]
pub struct NoopTransport;

#[async_trait]
impl MessagesClient for NoopTransport {
    async fn send_messages(
        &self,
        messages: &[EmailMessage],
        reseller_id: i64,
        client_id: Option<i64>,
        event: NotificationEvent,
        target_status: Option<i64>,
    ) -> Result<(), MessagingError> {
        for message in messages {
            tracing::info!(
                to = %message.email_to,
                subject = %message.subject,
                reseller_id = reseller_id,
                client_id = ?client_id,
                event = %event,
                target_status = ?target_status,
                "Noop: skipping email delivery"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationManager for NoopTransport {
    async fn send(
        &self,
        reseller_id: i64,
        client_id: i64,
        event: NotificationEvent,
        target_status: i64,
        _template: &TemplateData,
    ) -> SmsOutcome {
        tracing::info!(
            reseller_id = reseller_id,
            client_id = client_id,
            event = %event,
            target_status = target_status,
            "Noop: skipping SMS delivery"
        );
        SmsOutcome::sent()
    }
}
