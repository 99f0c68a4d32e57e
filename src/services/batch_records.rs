use chrono::Utc;
use metrics::counter;
use sea_orm::{ConnectionTrait, NotSet, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::DbPool,
    dto::{BatchRecordWithRelations, CreateBatchRecordRequest, NewStepInput, NewTestInput, UpdateBatchRecordRequest},
    entities::{
        batch_record::{self, ActiveModel as BatchRecordActiveModel},
        manufacturing_step, quality_control_test, quality_review, user,
        work_order::{ActiveModel as WorkOrderActiveModel, WorkOrderStatus},
        ActivityType, EntityKind,
    },
    errors::ServiceError,
    repositories::{
        ActivityLogRepository, BatchRecordRepository, ManufacturingStepRepository, NewActivity,
        ProductRepository, QualityControlTestRepository, QualityReviewRepository, UserRepository,
        WorkOrderRepository,
    },
    services::{lifecycle, views},
};

/// Batch record creation, submission and reads.
#[derive(Debug, Clone)]
pub struct BatchRecordService {
    db_pool: Arc<DbPool>,
}

impl BatchRecordService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Opens the batch record of a work order, seeding its steps and tests.
    ///
    /// A planned work order moves to `in_progress`. A work order can only ever
    /// have one batch record.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn create_batch_record(
        &self,
        actor: &user::Model,
        request: CreateBatchRecordRequest,
    ) -> Result<batch_record::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;

        let work_orders = WorkOrderRepository::new(&txn);
        let work_order = work_orders
            .find_by_id(request.work_order_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", request.work_order_id))
            })?;

        let batch_records = BatchRecordRepository::new(&txn);
        if batch_records
            .find_by_work_order(work_order.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Batch record already exists for work order {}",
                work_order.work_order_number
            )));
        }

        let product = ProductRepository::new(&txn)
            .find_by_id(work_order.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", work_order.product_id)))?;

        let operator_id = request.operator_id.unwrap_or(work_order.assigned_operator_id);
        UserRepository::new(&txn)
            .find_by_id(operator_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Operator {} not found", operator_id)))?;

        let batch_number = lifecycle::batch_number(
            &product.name,
            &work_order.work_order_number,
            work_order.batch_size,
        )
        .ok_or_else(|| {
            ServiceError::InternalError(format!(
                "work order number {} is not in WO-<year>-<seq> form",
                work_order.work_order_number
            ))
        })?;

        let record = batch_records
            .create(BatchRecordActiveModel {
                id: NotSet,
                work_order_id: Set(work_order.id),
                operator_id: Set(operator_id),
                batch_number: Set(batch_number.clone()),
                completion_percentage: Set(0),
                is_complete: Set(false),
                submitted_at: Set(None),
                created_at: NotSet,
                updated_at: NotSet,
            })
            .await?;

        let steps = request.manufacturing_steps.unwrap_or_else(default_steps);
        seed_steps(&txn, record.id, steps).await?;
        let tests = request.quality_control_tests.unwrap_or_else(default_tests);
        seed_tests(&txn, record.id, tests).await?;

        if work_order.status == WorkOrderStatus::Planned {
            let mut active: WorkOrderActiveModel = work_order.clone().into();
            active.status = Set(WorkOrderStatus::InProgress);
            work_orders.update(active).await?;
        }

        ActivityLogRepository::new(&txn)
            .append(NewActivity {
                user_id: actor.id,
                activity_type: ActivityType::BatchRecordCreated,
                entity_type: EntityKind::BatchRecord,
                entity_id: record.id,
                details: format!(
                    "Batch record {} created for work order {}",
                    batch_number, work_order.work_order_number
                ),
            })
            .await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        counter!("batchtrack.batch_records.created", 1);
        info!(
            batch_record_id = record.id,
            batch_number = %batch_number,
            work_order_id = work_order.id,
            "Batch record created"
        );
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get_batch_record(&self, id: i32) -> Result<batch_record::Model, ServiceError> {
        BatchRecordRepository::new(self.db_pool.as_ref())
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Batch record {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_batch_record_with_relations(
        &self,
        id: i32,
    ) -> Result<BatchRecordWithRelations, ServiceError> {
        let record = self.get_batch_record(id).await?;
        views::batch_record_with_relations(self.db_pool.as_ref(), record).await
    }

    /// The batch record opened for a work order.
    #[instrument(skip(self))]
    pub async fn get_for_work_order(
        &self,
        work_order_id: i32,
    ) -> Result<batch_record::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        WorkOrderRepository::new(db)
            .find_by_id(work_order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Work order {} not found", work_order_id)))?;

        BatchRecordRepository::new(db)
            .find_by_work_order(work_order_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No batch record for work order {}", work_order_id))
            })
    }

    #[instrument(skip(self))]
    pub async fn get_for_work_order_with_relations(
        &self,
        work_order_id: i32,
    ) -> Result<BatchRecordWithRelations, ServiceError> {
        let record = self.get_for_work_order(work_order_id).await?;
        views::batch_record_with_relations(self.db_pool.as_ref(), record).await
    }

    #[instrument(skip(self))]
    pub async fn list_batch_records(&self) -> Result<Vec<batch_record::Model>, ServiceError> {
        BatchRecordRepository::new(self.db_pool.as_ref()).find_all().await
    }

    #[instrument(skip(self))]
    pub async fn list_batch_records_with_relations(
        &self,
    ) -> Result<Vec<BatchRecordWithRelations>, ServiceError> {
        let records = self.list_batch_records().await?;
        views::batch_records_with_relations(self.db_pool.as_ref(), records).await
    }

    #[instrument(skip(self))]
    pub async fn list_steps(
        &self,
        batch_record_id: i32,
    ) -> Result<Vec<manufacturing_step::Model>, ServiceError> {
        self.get_batch_record(batch_record_id).await?;
        ManufacturingStepRepository::new(self.db_pool.as_ref())
            .find_by_batch_record(batch_record_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_tests(
        &self,
        batch_record_id: i32,
    ) -> Result<Vec<quality_control_test::Model>, ServiceError> {
        self.get_batch_record(batch_record_id).await?;
        QualityControlTestRepository::new(self.db_pool.as_ref())
            .find_by_batch_record(batch_record_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_review(
        &self,
        batch_record_id: i32,
    ) -> Result<quality_review::Model, ServiceError> {
        self.get_batch_record(batch_record_id).await?;
        QualityReviewRepository::new(self.db_pool.as_ref())
            .find_by_batch_record(batch_record_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "No quality review for batch record {}",
                    batch_record_id
                ))
            })
    }

    /// Applies a partial update.
    ///
    /// Marking the record complete forces 100%, stamps `submittedAt` if absent and
    /// hands the work order to quality review. Reopening recomputes progress from
    /// the steps unless a percentage is supplied.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn update_batch_record(
        &self,
        actor: &user::Model,
        id: i32,
        request: UpdateBatchRecordRequest,
    ) -> Result<batch_record::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;
        let batch_records = BatchRecordRepository::new(&txn);

        let existing = batch_records
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Batch record {} not found", id)))?;

        let will_complete = request.is_complete.unwrap_or(existing.is_complete);
        let submitting = will_complete && !existing.is_complete;
        let reopening = !will_complete && existing.is_complete;

        let mut active: BatchRecordActiveModel = existing.clone().into();
        active.is_complete = Set(will_complete);

        let percentage = if will_complete {
            100
        } else if let Some(pct) = request.completion_percentage {
            pct
        } else if reopening {
            let (completed, total) = ManufacturingStepRepository::new(&txn)
                .progress(existing.id)
                .await?;
            lifecycle::completion_percentage(completed, total)
        } else {
            existing.completion_percentage
        };
        active.completion_percentage = Set(percentage);

        let submitted_at = match (request.submitted_at, existing.submitted_at) {
            (Some(ts), _) => Some(ts),
            (None, Some(ts)) => Some(ts),
            (None, None) if submitting => Some(Utc::now()),
            (None, None) => None,
        };
        active.submitted_at = Set(submitted_at);

        if will_complete == existing.is_complete
            && percentage == existing.completion_percentage
            && submitted_at == existing.submitted_at
        {
            return Ok(existing);
        }

        let updated = batch_records.update(active).await?;
        let activity = ActivityLogRepository::new(&txn);

        if submitting {
            let work_orders = WorkOrderRepository::new(&txn);
            let work_order = work_orders
                .find_by_id(updated.work_order_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Work order {} not found", updated.work_order_id))
                })?;

            if work_order.status.is_closed() {
                warn!(
                    work_order_id = work_order.id,
                    status = %work_order.status,
                    "Batch record resubmitted after a final decision; work order status kept"
                );
            } else if work_order.status != WorkOrderStatus::UnderReview {
                let mut wo: WorkOrderActiveModel = work_order.into();
                wo.status = Set(WorkOrderStatus::UnderReview);
                work_orders.update(wo).await?;
            }

            activity
                .append(NewActivity {
                    user_id: actor.id,
                    activity_type: ActivityType::BatchRecordSubmitted,
                    entity_type: EntityKind::BatchRecord,
                    entity_id: updated.id,
                    details: format!("Batch record {} submitted for review", updated.batch_number),
                })
                .await?;
        } else {
            activity
                .append(NewActivity {
                    user_id: actor.id,
                    activity_type: ActivityType::BatchRecordUpdated,
                    entity_type: EntityKind::BatchRecord,
                    entity_id: updated.id,
                    details: format!(
                        "Batch record {} updated ({}% complete)",
                        updated.batch_number, updated.completion_percentage
                    ),
                })
                .await?;
        }

        txn.commit().await.map_err(ServiceError::db_error)?;

        if submitting {
            counter!("batchtrack.batch_records.submitted", 1);
            info!(batch_record_id = updated.id, "Batch record submitted for review");
        } else {
            info!(batch_record_id = updated.id, "Batch record updated");
        }
        Ok(updated)
    }
}

fn default_steps() -> Vec<NewStepInput> {
    lifecycle::DEFAULT_STEPS
        .iter()
        .map(|template| NewStepInput {
            name: template.name.to_string(),
            description: Some(template.description.to_string()),
            sort_order: template.sort_order,
        })
        .collect()
}

fn default_tests() -> Vec<NewTestInput> {
    lifecycle::DEFAULT_TESTS
        .iter()
        .map(|template| NewTestInput {
            name: template.name.to_string(),
            acceptable_range: Some(template.acceptable_range.to_string()),
        })
        .collect()
}

async fn seed_steps<C: ConnectionTrait>(
    db: &C,
    batch_record_id: i32,
    steps: Vec<NewStepInput>,
) -> Result<(), ServiceError> {
    let repo = ManufacturingStepRepository::new(db);
    for step in steps {
        repo.create(manufacturing_step::ActiveModel {
            id: NotSet,
            batch_record_id: Set(batch_record_id),
            name: Set(step.name),
            description: Set(step.description),
            completed_at: Set(None),
            completed_by: Set(None),
            sort_order: Set(step.sort_order),
            created_at: NotSet,
        })
        .await?;
    }
    Ok(())
}

async fn seed_tests<C: ConnectionTrait>(
    db: &C,
    batch_record_id: i32,
    tests: Vec<NewTestInput>,
) -> Result<(), ServiceError> {
    let repo = QualityControlTestRepository::new(db);
    for test in tests {
        repo.create(quality_control_test::ActiveModel {
            id: NotSet,
            batch_record_id: Set(batch_record_id),
            name: Set(test.name),
            acceptable_range: Set(test.acceptable_range),
            result: Set(None),
            is_passed: Set(None),
            completed_at: Set(None),
            completed_by: Set(None),
            created_at: NotSet,
        })
        .await?;
    }
    Ok(())
}
