use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of return notification carried by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationType {
    /// A new position was added to the return
    New,
    /// The status of an existing position changed
    Change,
    /// Any other non-zero code supplied by the caller
    Other(i64),
}

impl NotificationType {
    pub const NEW_CODE: i64 = 1;
    pub const CHANGE_CODE: i64 = 2;

    /// Map a raw code to a notification type. Zero means "absent".
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => None,
            Self::NEW_CODE => Some(Self::New),
            Self::CHANGE_CODE => Some(Self::Change),
            other => Some(Self::Other(other)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::New => Self::NEW_CODE,
            Self::Change => Self::CHANGE_CODE,
            Self::Other(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Change => "change",
            Self::Other(_) => "other",
        }
    }
}

/// Event identifier handed to the outbound transports. Every return
/// notification channel reports a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationEvent {
    ChangeReturnStatus,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChangeReturnStatus => "changeReturnStatus",
        }
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reseller on whose behalf notifications are sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub name: String,
    /// Sender address for outgoing email (optional)
    #[serde(default)]
    pub email_from: Option<String>,
    /// Employee addresses allowed to receive notifications, keyed by event name
    #[serde(default)]
    pub permitted_emails: HashMap<String, Vec<String>>,
}

impl Seller {
    /// Sender address, if one is configured and non-blank
    pub fn email_from(&self) -> Option<&str> {
        non_blank(self.email_from.as_deref())
    }

    /// Addresses permitted to receive the given event
    pub fn emails_by_permit(&self, event: &str) -> Vec<&str> {
        self.permitted_emails
            .get(event)
            .map(|emails| {
                emails
                    .iter()
                    .map(String::as_str)
                    .filter(|email| !email.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Contractor category. Only customers may receive return notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContractorType {
    #[default]
    Customer,
    Seller,
    Employee,
}

/// Client (contractor) attached to a return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub contractor_type: ContractorType,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl Contractor {
    /// Display name: the contractor name followed by its id
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.id).trim().to_string()
    }

    pub fn is_customer(&self) -> bool {
        self.contractor_type == ContractorType::Customer
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    pub fn mobile(&self) -> Option<&str> {
        non_blank(self.mobile.as_deref())
    }
}

/// Staff member referenced by a complaint (creator or expert)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Return position status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller() -> Seller {
        Seller {
            id: 1,
            name: "Acme".to_string(),
            email_from: Some("noreply@acme.test".to_string()),
            permitted_emails: HashMap::from([(
                "tsGoodsReturn".to_string(),
                vec!["ops@acme.test".to_string(), " ".to_string()],
            )]),
        }
    }

    #[test]
    fn test_notification_type_from_code() {
        assert_eq!(NotificationType::from_code(0), None);
        assert_eq!(NotificationType::from_code(1), Some(NotificationType::New));
        assert_eq!(NotificationType::from_code(2), Some(NotificationType::Change));
        assert_eq!(
            NotificationType::from_code(7),
            Some(NotificationType::Other(7))
        );
        assert_eq!(NotificationType::Other(7).code(), 7);
    }

    #[test]
    fn test_notification_event_wire_name() {
        let event = NotificationEvent::ChangeReturnStatus;
        assert_eq!(event.to_string(), "changeReturnStatus");
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            serde_json::json!(event.as_str())
        );
    }

    #[test]
    fn test_seller_emails_by_permit_skips_blank() {
        let seller = seller();
        assert_eq!(seller.emails_by_permit("tsGoodsReturn"), vec!["ops@acme.test"]);
        assert!(seller.emails_by_permit("otherEvent").is_empty());
    }

    #[test]
    fn test_seller_blank_email_from() {
        let mut seller = seller();
        seller.email_from = Some("   ".to_string());
        assert_eq!(seller.email_from(), None);
    }

    #[test]
    fn test_contractor_full_name() {
        let client = Contractor {
            id: 5,
            contractor_type: ContractorType::Customer,
            name: "Jane Roe".to_string(),
            email: None,
            mobile: Some(String::new()),
        };
        assert_eq!(client.full_name(), "Jane Roe 5");
        assert!(client.is_customer());
        assert_eq!(client.mobile(), None);
    }

    #[test]
    fn test_employee_full_name_trims() {
        let employee = Employee {
            id: 2,
            first_name: "Ivan".to_string(),
            last_name: String::new(),
        };
        assert_eq!(employee.full_name(), "Ivan");
    }

    #[test]
    fn test_contractor_type_deserialize() {
        let client: Contractor =
            serde_json::from_str(r#"{"id":1,"type":"seller","name":"X"}"#).unwrap();
        assert_eq!(client.contractor_type, ContractorType::Seller);
        assert!(!client.is_customer());
    }
}
