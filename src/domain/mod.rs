//! Domain layer
//!
//! This module contains the entities the return operation works with:
//! - `models`: sellers, contractors, employees, statuses and event identifiers
//! - `template_data`: the flat payload handed to rendering and the SMS channel

mod models;
mod template_data;

pub use models::{
    Contractor, ContractorType, Employee, NotificationEvent, NotificationType, Seller, Status,
};
pub use template_data::{TemplateData, TemplateValue};
