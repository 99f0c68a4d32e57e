use chrono::{Datelike, Utc};
use metrics::counter;
use sea_orm::{NotSet, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    dto::{CreateWorkOrderRequest, UpdateWorkOrderRequest, WorkOrderWithRelations},
    entities::{
        user,
        work_order::{self, ActiveModel as WorkOrderActiveModel, WorkOrderStatus},
        ActivityType, EntityKind,
    },
    errors::{FieldError, ServiceError},
    repositories::{
        ActivityLogRepository, NewActivity, ProductRepository, UserRepository, WorkOrderRepository,
    },
    services::{lifecycle, views},
};

/// Planning and manual maintenance of work orders.
#[derive(Debug, Clone)]
pub struct WorkOrderService {
    db_pool: Arc<DbPool>,
}

impl WorkOrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a work order with the next `WO-<year>-<seq>` number.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn create_work_order(
        &self,
        actor: &user::Model,
        request: CreateWorkOrderRequest,
    ) -> Result<work_order::Model, ServiceError> {
        if let Some(end_date) = request.end_date {
            if end_date < request.start_date {
                return Err(ServiceError::InvalidFields(vec![FieldError::new(
                    "endDate",
                    "must not be before startDate",
                )]));
            }
        }

        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;

        ProductRepository::new(&txn)
            .find_by_id(request.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", request.product_id)))?;
        UserRepository::new(&txn)
            .find_by_id(request.assigned_operator_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Operator {} not found", request.assigned_operator_id))
            })?;

        let repo = WorkOrderRepository::new(&txn);
        let year = Utc::now().year();
        let last_suffix = repo.max_number_suffix(year).await?;
        let number = lifecycle::next_work_order_number(year, last_suffix);

        let work_order = repo
            .create(WorkOrderActiveModel {
                id: NotSet,
                work_order_number: Set(number.clone()),
                product_id: Set(request.product_id),
                batch_size: Set(request.batch_size),
                assigned_operator_id: Set(request.assigned_operator_id),
                status: Set(request.status.unwrap_or(WorkOrderStatus::Planned)),
                start_date: Set(request.start_date),
                end_date: Set(request.end_date),
                notes: Set(request.notes),
                status_changed_at: NotSet,
                created_at: NotSet,
                updated_at: NotSet,
            })
            .await?;

        ActivityLogRepository::new(&txn)
            .append(NewActivity {
                user_id: actor.id,
                activity_type: ActivityType::WorkOrderCreated,
                entity_type: EntityKind::WorkOrder,
                entity_id: work_order.id,
                details: format!("Work order {} created", number),
            })
            .await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        counter!("batchtrack.work_orders.created", 1);
        info!(work_order_id = work_order.id, number = %number, "Work order created");
        Ok(work_order)
    }

    #[instrument(skip(self))]
    pub async fn get_work_order(&self, id: i32) -> Result<work_order::Model, ServiceError> {
        WorkOrderRepository::new(self.db_pool.as_ref())
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_work_order_with_relations(
        &self,
        id: i32,
    ) -> Result<WorkOrderWithRelations, ServiceError> {
        let work_order = self.get_work_order(id).await?;
        views::work_order_with_relations(self.db_pool.as_ref(), work_order).await
    }

    #[instrument(skip(self))]
    pub async fn list_work_orders(
        &self,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<work_order::Model>, ServiceError> {
        WorkOrderRepository::new(self.db_pool.as_ref())
            .find_all(status)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_work_orders_with_relations(
        &self,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<WorkOrderWithRelations>, ServiceError> {
        let work_orders = self.list_work_orders(status).await?;
        views::work_orders_with_relations(self.db_pool.as_ref(), work_orders).await
    }

    /// Applies a partial update. A status change is a manual override and is
    /// logged separately from edits to the other fields.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn update_work_order(
        &self,
        actor: &user::Model,
        id: i32,
        request: UpdateWorkOrderRequest,
    ) -> Result<work_order::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;
        let repo = WorkOrderRepository::new(&txn);

        let existing = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", id)))?;

        let mut active: WorkOrderActiveModel = existing.clone().into();
        let mut edited = false;

        if let Some(operator_id) = request.assigned_operator_id {
            if operator_id != existing.assigned_operator_id {
                UserRepository::new(&txn)
                    .find_by_id(operator_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("Operator {} not found", operator_id)))?;
                active.assigned_operator_id = Set(operator_id);
                edited = true;
            }
        }
        if let Some(notes) = request.notes {
            if notes != existing.notes {
                active.notes = Set(notes);
                edited = true;
            }
        }
        if let Some(end_date) = request.end_date {
            if let Some(end) = end_date {
                if end < existing.start_date {
                    return Err(ServiceError::InvalidFields(vec![FieldError::new(
                        "endDate",
                        "must not be before startDate",
                    )]));
                }
            }
            if end_date != existing.end_date {
                active.end_date = Set(end_date);
                edited = true;
            }
        }

        let status_change = request
            .status
            .filter(|status| *status != existing.status);
        if let Some(status) = status_change {
            active.status = Set(status);
        }

        if !edited && status_change.is_none() {
            return Ok(existing);
        }

        let updated = repo.update(active).await?;
        let activity = ActivityLogRepository::new(&txn);

        if let Some(status) = status_change {
            activity
                .append(NewActivity {
                    user_id: actor.id,
                    activity_type: ActivityType::WorkOrderStatusChanged,
                    entity_type: EntityKind::WorkOrder,
                    entity_id: updated.id,
                    details: format!(
                        "Work order {} status changed from {} to {}",
                        updated.work_order_number, existing.status, status
                    ),
                })
                .await?;
        }
        if edited {
            activity
                .append(NewActivity {
                    user_id: actor.id,
                    activity_type: ActivityType::WorkOrderUpdated,
                    entity_type: EntityKind::WorkOrder,
                    entity_id: updated.id,
                    details: format!("Work order {} updated", updated.work_order_number),
                })
                .await?;
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        info!(work_order_id = updated.id, status = %updated.status, "Work order updated");
        Ok(updated)
    }
}
