//! Request parsing and input validation

use serde::Serialize;

use crate::domain::NotificationType;

use super::{OperationError, OperationResult, RequestData};

/// Status transition reported with a CHANGE notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Differences {
    pub from: i64,
    pub to: i64,
}

/// Validated goods return request.
///
/// Numeric fields are coerced leniently: JSON numbers, numeric strings and
/// booleans are accepted, anything else reads as zero. Text fields accept
/// strings and numbers, anything else reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnNotificationRequest {
    pub reseller_id: i64,
    pub notification_type: NotificationType,
    pub client_id: i64,
    pub creator_id: i64,
    pub expert_id: i64,
    pub complaint_id: i64,
    pub complaint_number: String,
    pub consumption_id: i64,
    pub consumption_number: String,
    pub agreement_number: String,
    pub date: String,
    pub differences: Option<Differences>,
}

impl ReturnNotificationRequest {
    /// Validate required identifiers and build a typed request.
    pub fn from_data(data: &RequestData) -> OperationResult<Self> {
        let reseller_id = int_field(data, "resellerId");
        if reseller_id == 0 {
            return Err(OperationError::InvalidRequest("Empty resellerId".to_string()));
        }

        let notification_type = NotificationType::from_code(int_field(data, "notificationType"))
            .ok_or_else(|| OperationError::InvalidRequest("Empty notificationType".to_string()))?;

        let client_id = int_field(data, "clientId");
        let creator_id = int_field(data, "creatorId");
        let expert_id = int_field(data, "expertId");
        if client_id == 0 || creator_id == 0 || expert_id == 0 {
            return Err(OperationError::InvalidRequest(
                "Missing required data".to_string(),
            ));
        }

        Ok(Self {
            reseller_id,
            notification_type,
            client_id,
            creator_id,
            expert_id,
            complaint_id: int_field(data, "complaintId"),
            complaint_number: string_field(data, "complaintNumber"),
            consumption_id: int_field(data, "consumptionId"),
            consumption_number: string_field(data, "consumptionNumber"),
            agreement_number: string_field(data, "agreementNumber"),
            date: string_field(data, "date"),
            differences: differences_field(data),
        })
    }

    /// Target status for client-facing channels: set only for CHANGE
    /// notifications whose `differences.to` is non-zero.
    pub fn target_status(&self) -> Option<i64> {
        if self.notification_type != NotificationType::Change {
            return None;
        }
        self.differences.map(|d| d.to).filter(|to| *to != 0)
    }
}

fn differences_field(data: &RequestData) -> Option<Differences> {
    match data.get("differences") {
        Some(serde_json::Value::Object(map)) if !map.is_empty() => Some(Differences {
            from: map.get("from").map(coerce_int).unwrap_or(0),
            to: map.get("to").map(coerce_int).unwrap_or(0),
        }),
        _ => None,
    }
}

fn int_field(data: &RequestData, key: &str) -> i64 {
    data.get(key).map(coerce_int).unwrap_or(0)
}

fn string_field(data: &RequestData, key: &str) -> String {
    match data.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    }
}

fn coerce_int(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => leading_int(s),
        serde_json::Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Parse the leading integer of a string ("12abc" -> 12, "abc" -> 0)
fn leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: serde_json::Value) -> RequestData {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn valid() -> serde_json::Value {
        json!({
            "resellerId": 1,
            "notificationType": 2,
            "clientId": 1,
            "creatorId": 2,
            "expertId": 3,
            "complaintId": 10,
            "complaintNumber": "C-10",
            "consumptionId": 20,
            "consumptionNumber": "CN-20",
            "agreementNumber": "AG-1",
            "date": "2024-05-01",
            "differences": {"from": 1, "to": 2}
        })
    }

    #[test]
    fn test_valid_request() {
        let request = ReturnNotificationRequest::from_data(&data(valid())).unwrap();
        assert_eq!(request.reseller_id, 1);
        assert_eq!(request.notification_type, NotificationType::Change);
        assert_eq!(request.complaint_number, "C-10");
        assert_eq!(request.differences, Some(Differences { from: 1, to: 2 }));
        assert_eq!(request.target_status(), Some(2));
    }

    #[test]
    fn test_missing_reseller() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("resellerId");
        let err = ReturnNotificationRequest::from_data(&data(value)).unwrap_err();
        assert_eq!(err, OperationError::InvalidRequest("Empty resellerId".to_string()));
    }

    #[test]
    fn test_zero_notification_type() {
        let mut value = valid();
        value["notificationType"] = json!("0");
        let err = ReturnNotificationRequest::from_data(&data(value)).unwrap_err();
        assert_eq!(
            err,
            OperationError::InvalidRequest("Empty notificationType".to_string())
        );
    }

    #[test]
    fn test_missing_participant_ids() {
        for key in ["clientId", "creatorId", "expertId"] {
            let mut value = valid();
            value[key] = json!(null);
            let err = ReturnNotificationRequest::from_data(&data(value)).unwrap_err();
            assert_eq!(
                err,
                OperationError::InvalidRequest("Missing required data".to_string()),
                "field {}",
                key
            );
        }
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut value = valid();
        value["resellerId"] = json!("7");
        value["complaintId"] = json!("15abc");
        value["complaintNumber"] = json!(77);
        let request = ReturnNotificationRequest::from_data(&data(value)).unwrap();
        assert_eq!(request.reseller_id, 7);
        assert_eq!(request.complaint_id, 15);
        assert_eq!(request.complaint_number, "77");
    }

    #[test]
    fn test_empty_differences_is_absent() {
        let mut value = valid();
        value["differences"] = json!({});
        let request = ReturnNotificationRequest::from_data(&data(value)).unwrap();
        assert_eq!(request.differences, None);
        assert_eq!(request.target_status(), None);
    }

    #[test]
    fn test_target_status_requires_change() {
        let mut value = valid();
        value["notificationType"] = json!(1);
        let request = ReturnNotificationRequest::from_data(&data(value)).unwrap();
        assert_eq!(request.target_status(), None);

        let mut value = valid();
        value["differences"] = json!({"from": 1});
        let request = ReturnNotificationRequest::from_data(&data(value)).unwrap();
        assert_eq!(request.target_status(), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int(" 42"), 42);
        assert_eq!(leading_int("-3x"), -3);
        assert_eq!(leading_int("abc"), 0);
        assert_eq!(leading_int(""), 0);
    }
}
