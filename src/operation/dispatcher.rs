use std::sync::Arc;

use serde::Serialize;

use crate::domain::{NotificationEvent, TemplateData};
use crate::localization::{keys, Localizer};
use crate::messaging::{EmailMessage, MessagesClient, NotificationManager};
use crate::metrics::{Channel, ChannelMetrics};

use super::{ResolvedEntities, ReturnNotificationRequest};

/// Outcome of the client SMS attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientSmsResult {
    #[serde(rename = "isSent")]
    pub sent: bool,
    #[serde(rename = "message")]
    pub error_message: String,
}

/// Per-channel dispatch outcome, built fresh for every operation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    /// True once any employee email send call succeeded
    #[serde(rename = "notificationEmployeeByEmail")]
    pub employee_email_sent: bool,
    #[serde(rename = "notificationClientByEmail")]
    pub client_email_sent: bool,
    #[serde(rename = "notificationClientBySms")]
    pub client_sms: ClientSmsResult,
}

/// Sends employee email, client email and client SMS in that order.
///
/// Channels are independent: a failed or skipped channel never prevents the
/// next one, and transport errors end up in the result instead of propagating.
pub struct NotificationDispatcher {
    messages: Arc<dyn MessagesClient>,
    sms: Arc<dyn NotificationManager>,
    localizer: Arc<dyn Localizer>,
    employee_event: String,
}

impl NotificationDispatcher {
    pub fn new(
        messages: Arc<dyn MessagesClient>,
        sms: Arc<dyn NotificationManager>,
        localizer: Arc<dyn Localizer>,
        employee_event: impl Into<String>,
    ) -> Self {
        Self {
            messages,
            sms,
            localizer,
            employee_event: employee_event.into(),
        }
    }

    #[tracing::instrument(
        name = "dispatcher.dispatch",
        skip_all,
        fields(
            reseller_id = entities.seller.id,
            client_id = entities.client.id,
            notification_type = request.notification_type.as_str()
        )
    )]
    pub async fn dispatch(
        &self,
        request: &ReturnNotificationRequest,
        entities: &ResolvedEntities,
        template: &TemplateData,
    ) -> DispatchResult {
        let mut result = DispatchResult::default();
        let variables = template.to_variables();

        self.notify_employees(entities, &variables, &mut result).await;

        match request.target_status() {
            Some(target_status) => {
                self.notify_client_by_email(entities, &variables, target_status, &mut result)
                    .await;
                self.notify_client_by_sms(entities, template, target_status, &mut result)
                    .await;
            }
            None => {
                ChannelMetrics::record_skipped(Channel::ClientEmail);
                ChannelMetrics::record_skipped(Channel::ClientSms);
            }
        }

        tracing::info!(
            employee_email = result.employee_email_sent,
            client_email = result.client_email_sent,
            client_sms = result.client_sms.sent,
            "Return notifications dispatched"
        );

        result
    }

    async fn notify_employees(
        &self,
        entities: &ResolvedEntities,
        variables: &serde_json::Value,
        result: &mut DispatchResult,
    ) {
        let seller = &entities.seller;
        let recipients = seller.emails_by_permit(&self.employee_event);

        let email_from = match seller.email_from() {
            Some(from) if !recipients.is_empty() => from,
            _ => {
                tracing::debug!(
                    reseller_id = seller.id,
                    recipients = recipients.len(),
                    "Employee email skipped: no sender or recipients"
                );
                ChannelMetrics::record_skipped(Channel::EmployeeEmail);
                return;
            }
        };

        let subject = self
            .localizer
            .localize(keys::EMPLOYEE_EMAIL_SUBJECT, Some(variables), seller.id);
        let body = self
            .localizer
            .localize(keys::EMPLOYEE_EMAIL_BODY, Some(variables), seller.id);

        for email_to in recipients {
            let message = EmailMessage {
                email_from: email_from.to_string(),
                email_to: email_to.to_string(),
                subject: subject.clone(),
                message: body.clone(),
            };

            match self
                .messages
                .send_messages(
                    std::slice::from_ref(&message),
                    seller.id,
                    None,
                    NotificationEvent::ChangeReturnStatus,
                    None,
                )
                .await
            {
                Ok(()) => {
                    // Stays true even if a later recipient fails
                    result.employee_email_sent = true;
                    ChannelMetrics::record_sent(Channel::EmployeeEmail);
                }
                Err(e) => {
                    tracing::warn!(
                        reseller_id = seller.id,
                        to = %email_to,
                        error = %e,
                        "Failed to send employee email"
                    );
                    ChannelMetrics::record_failed(Channel::EmployeeEmail);
                }
            }
        }
    }

    async fn notify_client_by_email(
        &self,
        entities: &ResolvedEntities,
        variables: &serde_json::Value,
        target_status: i64,
        result: &mut DispatchResult,
    ) {
        let seller = &entities.seller;
        let client = &entities.client;

        let (email_from, email_to) = match (seller.email_from(), client.email()) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                tracing::debug!(
                    reseller_id = seller.id,
                    client_id = client.id,
                    "Client email skipped: missing sender or client address"
                );
                ChannelMetrics::record_skipped(Channel::ClientEmail);
                return;
            }
        };

        let message = EmailMessage {
            email_from: email_from.to_string(),
            email_to: email_to.to_string(),
            subject: self
                .localizer
                .localize(keys::CLIENT_EMAIL_SUBJECT, Some(variables), seller.id),
            message: self
                .localizer
                .localize(keys::CLIENT_EMAIL_BODY, Some(variables), seller.id),
        };

        match self
            .messages
            .send_messages(
                std::slice::from_ref(&message),
                seller.id,
                Some(client.id),
                NotificationEvent::ChangeReturnStatus,
                Some(target_status),
            )
            .await
        {
            Ok(()) => {
                result.client_email_sent = true;
                ChannelMetrics::record_sent(Channel::ClientEmail);
            }
            Err(e) => {
                tracing::warn!(
                    reseller_id = seller.id,
                    client_id = client.id,
                    error = %e,
                    "Failed to send client email"
                );
                ChannelMetrics::record_failed(Channel::ClientEmail);
            }
        }
    }

    async fn notify_client_by_sms(
        &self,
        entities: &ResolvedEntities,
        template: &TemplateData,
        target_status: i64,
        result: &mut DispatchResult,
    ) {
        let seller = &entities.seller;
        let client = &entities.client;

        if client.mobile().is_none() {
            tracing::debug!(client_id = client.id, "Client SMS skipped: no mobile number");
            ChannelMetrics::record_skipped(Channel::ClientSms);
            return;
        }

        let outcome = self
            .sms
            .send(
                seller.id,
                client.id,
                NotificationEvent::ChangeReturnStatus,
                target_status,
                template,
            )
            .await;

        if outcome.sent {
            result.client_sms.sent = true;
            ChannelMetrics::record_sent(Channel::ClientSms);
        } else {
            ChannelMetrics::record_failed(Channel::ClientSms);
        }

        if let Some(error) = outcome.error.filter(|e| !e.is_empty()) {
            tracing::warn!(
                reseller_id = seller.id,
                client_id = client.id,
                error = %error,
                "Client SMS reported an error"
            );
            result.client_sms.error_message = error;
        }
    }
}
