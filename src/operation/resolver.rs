//! Entity resolution stage

use std::sync::Arc;

use crate::directory::{ContractorRepository, EmployeeRepository, SellerRepository};
use crate::domain::{Contractor, Employee, Seller};

use super::{EntityKind, OperationError, OperationResult, ReturnNotificationRequest};

/// Entities referenced by a request, fetched once per operation
#[derive(Debug, Clone)]
pub struct ResolvedEntities {
    pub seller: Seller,
    pub client: Contractor,
    pub creator: Employee,
    pub expert: Employee,
}

pub struct EntityResolver {
    sellers: Arc<dyn SellerRepository>,
    contractors: Arc<dyn ContractorRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl EntityResolver {
    pub fn new(
        sellers: Arc<dyn SellerRepository>,
        contractors: Arc<dyn ContractorRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            sellers,
            contractors,
            employees,
        }
    }

    /// Look up seller, client, creator and expert in that order.
    pub async fn resolve(
        &self,
        request: &ReturnNotificationRequest,
    ) -> OperationResult<ResolvedEntities> {
        let seller = self
            .sellers
            .find_by_id(request.reseller_id)
            .await
            .ok_or(OperationError::EntityNotFound(EntityKind::Seller))?;

        let client = self.contractors.find_by_id(request.client_id).await;
        let client = validate_client(client, request.reseller_id)?;

        let creator = self
            .employees
            .find_by_id(request.creator_id)
            .await
            .ok_or(OperationError::EntityNotFound(EntityKind::Creator))?;

        let expert = self
            .employees
            .find_by_id(request.expert_id)
            .await
            .ok_or(OperationError::EntityNotFound(EntityKind::Expert))?;

        Ok(ResolvedEntities {
            seller,
            client,
            creator,
            expert,
        })
    }
}

/// The client must exist, be a customer, and carry the reseller's id.
fn validate_client(client: Option<Contractor>, reseller_id: i64) -> OperationResult<Contractor> {
    match client {
        Some(client) if client.is_customer() && client.id == reseller_id => Ok(client),
        Some(client) => {
            tracing::debug!(
                client_id = client.id,
                reseller_id = reseller_id,
                contractor_type = ?client.contractor_type,
                "Client rejected"
            );
            Err(OperationError::ClientMismatch)
        }
        None => Err(OperationError::ClientMismatch),
    }
}
