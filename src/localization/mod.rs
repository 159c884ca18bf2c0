//! Message localization.
//!
//! The operation never formats user-facing text itself; it asks a [`Localizer`]
//! for a message by key, optionally passing placeholder values, scoped to a
//! reseller so tenants can override wording.

mod catalog;
mod substitution;

pub use catalog::{keys, CatalogLocalizer, LocalizationError};
pub use substitution::substitute_variables;

/// Resolves a message key to text for a reseller
pub trait Localizer: Send + Sync {
    /// `params` is a JSON object whose entries fill `{{KEY}}` placeholders.
    fn localize(&self, key: &str, params: Option<&serde_json::Value>, reseller_id: i64) -> String;
}
