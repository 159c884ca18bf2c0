//! Difference message formatting

use std::sync::Arc;

use serde_json::json;

use crate::directory::StatusRepository;
use crate::domain::NotificationType;
use crate::localization::{keys, Localizer};

use super::ReturnNotificationRequest;

/// Produces the `DIFFERENCES` text for the template payload.
///
/// Never fails: an empty result is caught by template validation.
pub struct DifferenceFormatter {
    localizer: Arc<dyn Localizer>,
    statuses: Arc<dyn StatusRepository>,
}

impl DifferenceFormatter {
    pub fn new(localizer: Arc<dyn Localizer>, statuses: Arc<dyn StatusRepository>) -> Self {
        Self {
            localizer,
            statuses,
        }
    }

    pub async fn format(&self, request: &ReturnNotificationRequest) -> String {
        match (request.notification_type, request.differences) {
            (NotificationType::New, _) => {
                self.localizer
                    .localize(keys::NEW_POSITION_ADDED, None, request.reseller_id)
            }
            (NotificationType::Change, Some(differences)) => {
                let from = self.statuses.name_of(differences.from).await;
                let to = self.statuses.name_of(differences.to).await;
                let params = json!({ "FROM": from, "TO": to });
                self.localizer.localize(
                    keys::POSITION_STATUS_HAS_CHANGED,
                    Some(&params),
                    request.reseller_id,
                )
            }
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::domain::Status;
    use crate::localization::CatalogLocalizer;
    use crate::operation::Differences;

    fn formatter() -> DifferenceFormatter {
        let directory = InMemoryDirectory::new();
        directory.insert_status(Status {
            id: 1,
            name: "Pending".to_string(),
        });
        directory.insert_status(Status {
            id: 2,
            name: "Approved".to_string(),
        });
        DifferenceFormatter::new(Arc::new(CatalogLocalizer::new()), Arc::new(directory))
    }

    fn request(
        notification_type: NotificationType,
        differences: Option<Differences>,
    ) -> ReturnNotificationRequest {
        ReturnNotificationRequest {
            reseller_id: 1,
            notification_type,
            client_id: 1,
            creator_id: 2,
            expert_id: 3,
            complaint_id: 1,
            complaint_number: "C-1".to_string(),
            consumption_id: 1,
            consumption_number: "CN-1".to_string(),
            agreement_number: "AG-1".to_string(),
            date: "2024-05-01".to_string(),
            differences,
        }
    }

    #[tokio::test]
    async fn test_new_ignores_differences() {
        let formatter = formatter();
        let without = formatter.format(&request(NotificationType::New, None)).await;
        let with = formatter
            .format(&request(
                NotificationType::New,
                Some(Differences { from: 1, to: 2 }),
            ))
            .await;

        assert!(!without.is_empty());
        assert_eq!(without, with);
    }

    #[tokio::test]
    async fn test_change_names_both_statuses() {
        let text = formatter()
            .format(&request(
                NotificationType::Change,
                Some(Differences { from: 1, to: 2 }),
            ))
            .await;

        assert!(text.contains("Pending"));
        assert!(text.contains("Approved"));
    }

    #[tokio::test]
    async fn test_change_without_differences_is_empty() {
        let text = formatter()
            .format(&request(NotificationType::Change, None))
            .await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_other_type_is_empty() {
        let text = formatter()
            .format(&request(
                NotificationType::Other(5),
                Some(Differences { from: 1, to: 2 }),
            ))
            .await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_status_name_with_placeholder_is_literal() {
        let directory = InMemoryDirectory::new();
        directory.insert_status(Status {
            id: 1,
            name: "{{TO}}".to_string(),
        });
        directory.insert_status(Status {
            id: 2,
            name: "Approved".to_string(),
        });
        let formatter =
            DifferenceFormatter::new(Arc::new(CatalogLocalizer::new()), Arc::new(directory));

        let text = formatter
            .format(&request(
                NotificationType::Change,
                Some(Differences { from: 1, to: 2 }),
            ))
            .await;

        assert_eq!(text, "Position status has changed from \"{{TO}}\" to \"Approved\"");
    }
}
