//! Catalog-backed localizer with per-reseller overrides

use std::collections::HashMap;
use std::path::Path;

use dashmap::DashMap;
use thiserror::Error;

use super::substitution::substitute_variables;
use super::Localizer;

/// Message keys used by the return operation
pub mod keys {
    pub const NEW_POSITION_ADDED: &str = "NewPositionAdded";
    pub const POSITION_STATUS_HAS_CHANGED: &str = "PositionStatusHasChanged";
    pub const EMPLOYEE_EMAIL_SUBJECT: &str = "complaintEmployeeEmailSubject";
    pub const EMPLOYEE_EMAIL_BODY: &str = "complaintEmployeeEmailBody";
    pub const CLIENT_EMAIL_SUBJECT: &str = "complaintClientEmailSubject";
    pub const CLIENT_EMAIL_BODY: &str = "complaintClientEmailBody";
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Localizer backed by an in-memory message catalog.
///
/// Lookup order for a key is `"{reseller_id}:{key}"`, then `key`. A key with no
/// entry renders as the key itself.
pub struct CatalogLocalizer {
    messages: DashMap<String, String>,
}

impl Default for CatalogLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLocalizer {
    /// Create a localizer with the built-in catalog
    pub fn new() -> Self {
        let messages = DashMap::new();
        for (key, text) in default_catalog() {
            messages.insert(key.to_string(), text.to_string());
        }
        Self { messages }
    }

    /// Create a localizer with no messages at all
    pub fn empty() -> Self {
        Self {
            messages: DashMap::new(),
        }
    }

    /// Add or replace a message. Use `"{reseller_id}:{key}"` for reseller overrides.
    pub fn set(&self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    pub fn with_overrides(self, overrides: HashMap<String, String>) -> Self {
        for (key, text) in overrides {
            self.set(key, text);
        }
        self
    }

    /// Built-in catalog merged with a JSON object of overrides read from disk
    pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LocalizationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.display(),
            entries = overrides.len(),
            "Localization catalog loaded"
        );

        Ok(Self::new().with_overrides(overrides))
    }

    fn lookup(&self, key: &str, reseller_id: i64) -> Option<String> {
        self.messages
            .get(&format!("{}:{}", reseller_id, key))
            .or_else(|| self.messages.get(key))
            .map(|text| text.clone())
    }
}

impl Localizer for CatalogLocalizer {
    fn localize(&self, key: &str, params: Option<&serde_json::Value>, reseller_id: i64) -> String {
        let template = match self.lookup(key, reseller_id) {
            Some(text) => text,
            None => {
                tracing::warn!(key = %key, reseller_id = reseller_id, "Missing localization key");
                key.to_string()
            }
        };

        match params {
            Some(vars) => substitute_variables(&template, vars),
            None => template,
        }
    }
}

fn default_catalog() -> [(&'static str, &'static str); 6] {
    [
        (keys::NEW_POSITION_ADDED, "A new position has been added to the return"),
        (
            keys::POSITION_STATUS_HAS_CHANGED,
            "Position status has changed from \"{{FROM}}\" to \"{{TO}}\"",
        ),
        (
            keys::EMPLOYEE_EMAIL_SUBJECT,
            "Complaint {{COMPLAINT_NUMBER}}: goods return update",
        ),
        (
            keys::EMPLOYEE_EMAIL_BODY,
            "Complaint {{COMPLAINT_NUMBER}} (#{{COMPLAINT_ID}}) from {{DATE}}\n\
             Client: {{CLIENT_NAME}} (#{{CLIENT_ID}})\n\
             Created by: {{CREATOR_NAME}} (#{{CREATOR_ID}})\n\
             Expert: {{EXPERT_NAME}} (#{{EXPERT_ID}})\n\
             Consumption: {{CONSUMPTION_NUMBER}} (#{{CONSUMPTION_ID}})\n\
             Agreement: {{AGREEMENT_NUMBER}}\n\n\
             {{DIFFERENCES}}",
        ),
        (
            keys::CLIENT_EMAIL_SUBJECT,
            "Your return {{COMPLAINT_NUMBER}} has been updated",
        ),
        (
            keys::CLIENT_EMAIL_BODY,
            "Dear {{CLIENT_NAME}},\n\n\
             {{DIFFERENCES}}.\n\
             Return {{COMPLAINT_NUMBER}} under agreement {{AGREEMENT_NUMBER}}, {{DATE}}.",
        ),
    ]
}
