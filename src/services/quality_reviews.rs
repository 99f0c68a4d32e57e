use chrono::Utc;
use metrics::counter;
use sea_orm::{NotSet, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    dto::{BatchRecordWithRelations, CreateQualityReviewRequest, QualityReviewWithRelations},
    entities::{
        quality_review::{self, ActiveModel as ReviewActiveModel},
        user,
        work_order::ActiveModel as WorkOrderActiveModel,
        ActivityType, EntityKind,
    },
    errors::ServiceError,
    repositories::{
        ActivityLogRepository, BatchRecordRepository, NewActivity, QualityReviewRepository,
        WorkOrderRepository,
    },
    services::views,
};

/// Quality decisions on submitted batch records. Reviews are immutable once written.
#[derive(Debug, Clone)]
pub struct QualityReviewService {
    db_pool: Arc<DbPool>,
}

impl QualityReviewService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Writes the one review a batch record can have and applies its decision
    /// to the work order.
    #[instrument(skip(self, reviewer), fields(reviewer_id = reviewer.id))]
    pub async fn create_review(
        &self,
        reviewer: &user::Model,
        request: CreateQualityReviewRequest,
    ) -> Result<quality_review::Model, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(ServiceError::db_error)?;

        let record = BatchRecordRepository::new(&txn)
            .find_by_id(request.batch_record_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Batch record {} not found", request.batch_record_id))
            })?;

        let reviews = QualityReviewRepository::new(&txn);
        if reviews.find_by_batch_record(record.id).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Quality review already exists for batch record {}",
                record.batch_number
            )));
        }

        let review = reviews
            .create(ReviewActiveModel {
                id: NotSet,
                batch_record_id: Set(record.id),
                reviewer_id: Set(reviewer.id),
                decision: Set(request.decision),
                comments: Set(request.comments),
                reviewed_at: Set(Utc::now()),
                created_at: NotSet,
            })
            .await?;

        let work_orders = WorkOrderRepository::new(&txn);
        let work_order = work_orders
            .find_by_id(record.work_order_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Work order {} not found", record.work_order_id))
            })?;

        let next_status = review.decision.resulting_status();
        if work_order.status != next_status {
            let mut active: WorkOrderActiveModel = work_order.into();
            active.status = Set(next_status);
            work_orders.update(active).await?;
        }

        ActivityLogRepository::new(&txn)
            .append(NewActivity {
                user_id: reviewer.id,
                activity_type: ActivityType::QualityReviewCompleted,
                entity_type: EntityKind::QualityReview,
                entity_id: review.id,
                details: format!(
                    "Batch record {} {}",
                    record.batch_number,
                    review.decision.past_tense()
                ),
            })
            .await?;

        txn.commit().await.map_err(ServiceError::db_error)?;

        counter!("batchtrack.quality_reviews.created", 1, "decision" => review.decision.to_string());
        info!(
            review_id = review.id,
            batch_record_id = record.id,
            decision = %review.decision,
            "Quality review recorded"
        );
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> Result<Vec<quality_review::Model>, ServiceError> {
        QualityReviewRepository::new(self.db_pool.as_ref())
            .find_all()
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_reviews_with_relations(
        &self,
    ) -> Result<Vec<QualityReviewWithRelations>, ServiceError> {
        let reviews = self.list_reviews().await?;
        views::quality_reviews_with_relations(self.db_pool.as_ref(), reviews).await
    }

    /// Submitted batch records still waiting for a decision, oldest submission first.
    #[instrument(skip(self))]
    pub async fn list_pending(&self) -> Result<Vec<BatchRecordWithRelations>, ServiceError> {
        let db = self.db_pool.as_ref();
        let records = BatchRecordRepository::new(db).find_pending_review().await?;
        views::batch_records_with_relations(db, records).await
    }
}
