//! In-memory directory using DashMap.
//!
//! Data lives for the lifetime of the process. Lookups hand out clones so the
//! operation always works on a snapshot.

use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use crate::domain::{Contractor, Employee, Seller, Status};

use super::{
    ContractorRepository, DirectoryError, EmployeeRepository, SellerRepository, StatusRepository,
};

/// Seed document accepted by [`InMemoryDirectory::from_seed`]
#[derive(Debug, Default, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub contractors: Vec<Contractor>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub statuses: Vec<Status>,
}

#[derive(Default)]
pub struct InMemoryDirectory {
    sellers: DashMap<i64, Seller>,
    contractors: DashMap<i64, Contractor>,
    employees: DashMap<i64, Employee>,
    statuses: DashMap<i64, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: DirectorySeed) -> Self {
        let directory = Self::new();
        for seller in seed.sellers {
            directory.insert_seller(seller);
        }
        for contractor in seed.contractors {
            directory.insert_contractor(contractor);
        }
        for employee in seed.employees {
            directory.insert_employee(employee);
        }
        for status in seed.statuses {
            directory.insert_status(status);
        }
        directory
    }

    /// Load a directory from a JSON seed file
    pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let seed: DirectorySeed = serde_json::from_str(&raw)?;
        let directory = Self::from_seed(seed);

        tracing::info!(
            path = %path.display(),
            sellers = directory.sellers.len(),
            contractors = directory.contractors.len(),
            employees = directory.employees.len(),
            statuses = directory.statuses.len(),
            "Directory seed loaded"
        );

        Ok(directory)
    }

    pub fn insert_seller(&self, seller: Seller) {
        self.sellers.insert(seller.id, seller);
    }

    pub fn insert_contractor(&self, contractor: Contractor) {
        self.contractors.insert(contractor.id, contractor);
    }

    pub fn insert_employee(&self, employee: Employee) {
        self.employees.insert(employee.id, employee);
    }

    pub fn insert_status(&self, status: Status) {
        self.statuses.insert(status.id, status.name);
    }

    /// Entity counts as (sellers, contractors, employees, statuses)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.sellers.len(),
            self.contractors.len(),
            self.employees.len(),
            self.statuses.len(),
        )
    }
}

#[async_trait]
impl SellerRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: i64) -> Option<Seller> {
        self.sellers.get(&id).map(|s| s.clone())
    }
}

#[async_trait]
impl ContractorRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: i64) -> Option<Contractor> {
        self.contractors.get(&id).map(|c| c.clone())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryDirectory {
    async fn find_by_id(&self, id: i64) -> Option<Employee> {
        self.employees.get(&id).map(|e| e.clone())
    }
}

#[async_trait]
impl StatusRepository for InMemoryDirectory {
    async fn name_of(&self, status_id: i64) -> String {
        match self.statuses.get(&status_id) {
            Some(name) => name.clone(),
            None => {
                tracing::debug!(status_id = status_id, "Unknown status id");
                String::new()
            }
        }
    }
}
