//! Reference-data operations.
//!
//! An operation receives a raw request payload, extracts its named section with
//! [`ReferencesOperation::request_data`] and runs with
//! [`ReferencesOperation::do_operation`].
//!
//! The goods return operation runs its stages in strict order:
//!
//! 1. `request`: input validation
//! 2. `resolver`: entity lookups
//! 3. `differences`: difference message formatting
//! 4. `template`: template payload assembly and validation
//! 5. `dispatcher`: per-channel notification dispatch
//!
//! Stages 1-4 abort the operation on failure. Dispatch never does.

mod differences;
mod dispatcher;
mod goods_return;
mod request;
mod resolver;
mod template;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use differences::DifferenceFormatter;
pub use dispatcher::{ClientSmsResult, DispatchResult, NotificationDispatcher};
pub use goods_return::{GoodsReturnOperation, OperationStatsSnapshot};
pub use request::{Differences, ReturnNotificationRequest};
pub use resolver::{EntityResolver, ResolvedEntities};
pub use template::{build_template_data, validate_template_data, TEMPLATE_FIELDS};

/// Raw request section handed to an operation
pub type RequestData = serde_json::Map<String, serde_json::Value>;

/// Result type for operations
pub type OperationResult<T> = Result<T, OperationError>;

/// Entity looked up during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Seller,
    Creator,
    Expert,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => f.write_str("Seller"),
            Self::Creator => f.write_str("Creator"),
            Self::Expert => f.write_str("Expert"),
        }
    }
}

/// Fatal operation errors. Any of these aborts before a notification is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0} not found!")]
    EntityNotFound(EntityKind),

    #[error("Client not found or mismatch!")]
    ClientMismatch,

    #[error("Template Data ({0}) is empty!")]
    EmptyTemplateField(&'static str),
}

impl OperationError {
    /// Numeric error code in HTTP terms: request problems are 400, template failures 500
    pub fn code(&self) -> u16 {
        match self {
            Self::EmptyTemplateField(_) => 500,
            _ => 400,
        }
    }

    /// Stable label used for metrics and error responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::EntityNotFound(_) => "entity_not_found",
            Self::ClientMismatch => "client_mismatch",
            Self::EmptyTemplateField(_) => "empty_template_field",
        }
    }
}

/// Capability contract shared by reference-data operations
#[async_trait]
pub trait ReferencesOperation: Send + Sync {
    type Output: Serialize + Send;

    /// Extract the named section of a request payload.
    ///
    /// A missing or non-object section yields an empty map; validation reports it.
    fn request_data(&self, payload: &serde_json::Value, name: &str) -> RequestData {
        match payload.get(name) {
            Some(serde_json::Value::Object(map)) => map.clone(),
            _ => RequestData::new(),
        }
    }

    async fn do_operation(&self, data: RequestData) -> OperationResult<Self::Output>;
}
