use metrics::counter;
use sea_orm::{ConnectionTrait, NotSet, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    db::DbPool,
    dto::{CreateManufacturingStepRequest, UpdateManufacturingStepRequest},
    entities::{
        batch_record::{self, ActiveModel as BatchRecordActiveModel},
        manufacturing_step::{self, ActiveModel as StepActiveModel},
        user, ActivityType, EntityKind,
    },
    errors::ServiceError,
    repositories::{
        ActivityLogRepository, BatchRecordRepository, ManufacturingStepRepository, NewActivity,
        UserRepository,
    },
    services::lifecycle,
};

#[derive(Debug, Clone)]
pub struct ManufacturingStepService {
    db_pool: Arc<DbPool>,
}

impl ManufacturingStepService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Adds a step to an existing batch record and refreshes its progress.
    #[instrument(skip(self, _actor), fields(actor_id = _actor.id))]
    pub async fn create_step(
        &self,
        _actor: &user::Model,
        request: CreateManufacturingStepRequest,
    ) -> Result<manufacturing_step::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;

        let record = BatchRecordRepository::new(&txn)
            .find_by_id(request.batch_record_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Batch record {} not found", request.batch_record_id))
            })?;

        let step = ManufacturingStepRepository::new(&txn)
            .create(StepActiveModel {
                id: NotSet,
                batch_record_id: Set(record.id),
                name: Set(request.name),
                description: Set(request.description),
                completed_at: Set(None),
                completed_by: Set(None),
                sort_order: Set(request.sort_order),
                created_at: NotSet,
            })
            .await?;

        refresh_completion(&txn, record).await?;
        txn.commit().await.map_err(ServiceError::db_error)?;

        info!(step_id = step.id, batch_record_id = step.batch_record_id, "Manufacturing step added");
        Ok(step)
    }

    /// Records completion of a step and recomputes the batch record's progress.
    ///
    /// Completing a step twice is accepted and logged twice.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn update_step(
        &self,
        actor: &user::Model,
        id: i32,
        request: UpdateManufacturingStepRequest,
    ) -> Result<manufacturing_step::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;
        let steps = ManufacturingStepRepository::new(&txn);

        let existing = steps
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Manufacturing step {} not found", id)))?;

        if let Some(user_id) = request.completed_by {
            UserRepository::new(&txn)
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;
        }

        let Some(completed_at) = request.completed_at else {
            // Only the signature can change without completing the step.
            if let Some(user_id) = request.completed_by {
                let mut active: StepActiveModel = existing.into();
                active.completed_by = Set(Some(user_id));
                let updated = steps.update(active).await?;
                txn.commit().await.map_err(ServiceError::db_error)?;
                return Ok(updated);
            }
            return Ok(existing);
        };

        let mut active: StepActiveModel = existing.into();
        active.completed_at = Set(Some(completed_at));
        active.completed_by = Set(Some(request.completed_by.unwrap_or(actor.id)));
        let updated = steps.update(active).await?;

        let record = BatchRecordRepository::new(&txn)
            .find_by_id(updated.batch_record_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Batch record {} not found", updated.batch_record_id))
            })?;
        let batch_number = record.batch_number.clone();
        let percentage = refresh_completion(&txn, record).await?;

        ActivityLogRepository::new(&txn)
            .append(NewActivity {
                user_id: actor.id,
                activity_type: ActivityType::ManufacturingStepCompleted,
                entity_type: EntityKind::ManufacturingStep,
                entity_id: updated.id,
                details: format!(
                    "Step '{}' completed for batch {} ({}% complete)",
                    updated.name, batch_number, percentage
                ),
            })
            .await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        counter!("batchtrack.steps.completed", 1);
        info!(
            step_id = updated.id,
            batch_record_id = updated.batch_record_id,
            completion_percentage = percentage,
            "Manufacturing step completed"
        );
        Ok(updated)
    }
}

/// Recomputes `completionPercentage` over all steps of the record.
/// A complete record stays at 100.
pub(crate) async fn refresh_completion<C: ConnectionTrait>(
    db: &C,
    record: batch_record::Model,
) -> Result<i32, ServiceError> {
    if record.is_complete {
        return Ok(100);
    }

    let (completed, total) = ManufacturingStepRepository::new(db)
        .progress(record.id)
        .await?;
    let percentage = lifecycle::completion_percentage(completed, total);

    if percentage != record.completion_percentage {
        debug!(
            batch_record_id = record.id,
            from = record.completion_percentage,
            to = percentage,
            "Completion percentage changed"
        );
        let mut active: BatchRecordActiveModel = record.into();
        active.completion_percentage = Set(percentage);
        BatchRecordRepository::new(db).update(active).await?;
    }
    Ok(percentage)
}
