//! Template payload assembly and validation

use crate::domain::TemplateData;

use super::{OperationError, OperationResult, ResolvedEntities, ReturnNotificationRequest};

/// Template fields in assembly order
pub const TEMPLATE_FIELDS: [&str; 13] = [
    "COMPLAINT_ID",
    "COMPLAINT_NUMBER",
    "CREATOR_ID",
    "CREATOR_NAME",
    "EXPERT_ID",
    "EXPERT_NAME",
    "CLIENT_ID",
    "CLIENT_NAME",
    "CONSUMPTION_ID",
    "CONSUMPTION_NUMBER",
    "AGREEMENT_NUMBER",
    "DATE",
    "DIFFERENCES",
];

pub fn build_template_data(
    request: &ReturnNotificationRequest,
    entities: &ResolvedEntities,
    differences: String,
) -> TemplateData {
    let client_name = match entities.client.full_name() {
        name if name.is_empty() => entities.client.name.clone(),
        name => name,
    };

    TemplateData::new()
        .with("COMPLAINT_ID", request.complaint_id)
        .with("COMPLAINT_NUMBER", request.complaint_number.as_str())
        .with("CREATOR_ID", request.creator_id)
        .with("CREATOR_NAME", entities.creator.full_name())
        .with("EXPERT_ID", request.expert_id)
        .with("EXPERT_NAME", entities.expert.full_name())
        .with("CLIENT_ID", request.client_id)
        .with("CLIENT_NAME", client_name)
        .with("CONSUMPTION_ID", request.consumption_id)
        .with("CONSUMPTION_NUMBER", request.consumption_number.as_str())
        .with("AGREEMENT_NUMBER", request.agreement_number.as_str())
        .with("DATE", request.date.as_str())
        .with("DIFFERENCES", differences)
}

/// Reject the payload on its first empty field. Zero counts as empty.
pub fn validate_template_data(template: &TemplateData) -> OperationResult<()> {
    match template.iter().find(|(_, value)| value.is_empty()) {
        Some((key, _)) => Err(OperationError::EmptyTemplateField(key)),
        None => Ok(()),
    }
}
