//! Entity lookups used by the return operation.
//!
//! Each repository is a narrow trait so callers can plug in their own storage.
//! `InMemoryDirectory` implements all of them and can be seeded from a JSON file.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Contractor, Employee, Seller};

pub use memory::{DirectorySeed, InMemoryDirectory};

/// Errors raised while loading directory data
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Option<Seller>;
}

#[async_trait]
pub trait ContractorRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Option<Contractor>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Option<Employee>;
}

#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Human-readable status name; unknown ids resolve to an empty string
    async fn name_of(&self, status_id: i64) -> String;
}
