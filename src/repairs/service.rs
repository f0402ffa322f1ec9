// Repair lifecycle service - business logic layer

use chrono::Utc;

use crate::query::Paginated;
use crate::repairs::error::RepairError;
use crate::repairs::models::{
    CreateRepairRequest, RepairListParams, RepairOrder, RepairOrderSummary, RepairOrderWithItems,
    RepairStatus, UpdateRepairRequest, UpdateStatusRequest,
};
use crate::repairs::repository::RepairRepository;
use crate::repairs::status_machine::StatusMachine;

/// Service coordinating repair order creation, updates, and the status
/// lifecycle
#[derive(Clone)]
pub struct RepairService {
    repo: RepairRepository,
}

impl RepairService {
    pub fn new(repo: RepairRepository) -> Self {
        Self { repo }
    }

    /// Create a repair order with its line items in one transaction
    pub async fn create_repair(
        &self,
        request: CreateRepairRequest,
    ) -> Result<RepairOrderWithItems, RepairError> {
        let order = self.repo.create_with_items(request).await?;
        tracing::info!(
            "Created repair order {} for customer {} at total {}",
            order.id,
            order.customer_id,
            order.total_price
        );
        self.with_items(order).await
    }

    /// Get a repair order with its line items
    pub async fn get_repair(&self, id: i32) -> Result<RepairOrderWithItems, RepairError> {
        let order = self.repo.get_order(id).await?;
        self.with_items(order).await
    }

    /// List repair orders with filters
    pub async fn list_repairs(
        &self,
        params: RepairListParams,
    ) -> Result<Paginated<RepairOrderSummary>, RepairError> {
        self.repo.list(params).await
    }

    /// Update order fields and, when supplied, replace its items
    pub async fn update_repair(
        &self,
        id: i32,
        request: UpdateRepairRequest,
    ) -> Result<RepairOrderWithItems, RepairError> {
        let order = self.repo.update_with_items(id, request).await?;
        self.with_items(order).await
    }

    /// Apply a status transition
    ///
    /// completed_date is written only on the first arrival in completed; a
    /// repeated transition leaves the original date untouched.
    pub async fn update_status(
        &self,
        id: i32,
        request: UpdateStatusRequest,
    ) -> Result<RepairOrder, RepairError> {
        let order = self.repo.get_order(id).await?;

        let target = StatusMachine::transition(order.status, request.status)
            .map_err(RepairError::InvalidTransition)?;

        let completed_date = if target == RepairStatus::Completed {
            Some(request.completed_date.unwrap_or_else(Utc::now))
        } else {
            None
        };

        let updated = self.repo.set_status(id, target, completed_date).await?;
        tracing::info!(
            "Repair order {} moved from {} to {}",
            id,
            order.status,
            updated.status
        );
        Ok(updated)
    }

    /// Delete a repair order and its items
    pub async fn delete_repair(&self, id: i32) -> Result<(), RepairError> {
        self.repo.delete(id).await?;
        tracing::info!("Deleted repair order {}", id);
        Ok(())
    }

    async fn with_items(&self, order: RepairOrder) -> Result<RepairOrderWithItems, RepairError> {
        let items = self.repo.get_items(order.id).await?;
        Ok(RepairOrderWithItems { order, items })
    }
}
