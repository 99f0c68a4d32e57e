//! Assembly of the joined read models returned by `includeRelations=true`.

use futures::future::try_join_all;
use sea_orm::ConnectionTrait;

use crate::dto::{BatchRecordWithRelations, QualityReviewWithRelations, WorkOrderWithRelations};
use crate::entities::{batch_record, quality_review, user, work_order};
use crate::errors::ServiceError;
use crate::repositories::{
    BatchRecordRepository, ManufacturingStepRepository, ProductRepository,
    QualityControlTestRepository, QualityReviewRepository, UserRepository, WorkOrderRepository,
};

fn dangling(what: &str, id: i32, missing: &str, missing_id: i32) -> ServiceError {
    ServiceError::InternalError(format!(
        "{} {} references missing {} {}",
        what, id, missing, missing_id
    ))
}

async fn require_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    referenced_by: (&str, i32),
) -> Result<user::Model, ServiceError> {
    UserRepository::new(db)
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| dangling(referenced_by.0, referenced_by.1, "user", user_id))
}

pub async fn work_order_with_relations<C: ConnectionTrait>(
    db: &C,
    work_order: work_order::Model,
) -> Result<WorkOrderWithRelations, ServiceError> {
    let product = ProductRepository::new(db)
        .find_by_id(work_order.product_id)
        .await?
        .ok_or_else(|| dangling("work order", work_order.id, "product", work_order.product_id))?;
    let operator = require_user(db, work_order.assigned_operator_id, ("work order", work_order.id)).await?;
    let batch_record = BatchRecordRepository::new(db)
        .find_by_work_order(work_order.id)
        .await?;

    Ok(WorkOrderWithRelations {
        work_order,
        product,
        operator,
        batch_record,
    })
}

pub async fn batch_record_with_relations<C: ConnectionTrait>(
    db: &C,
    batch_record: batch_record::Model,
) -> Result<BatchRecordWithRelations, ServiceError> {
    let work_order = WorkOrderRepository::new(db)
        .find_by_id(batch_record.work_order_id)
        .await?
        .ok_or_else(|| {
            dangling("batch record", batch_record.id, "work order", batch_record.work_order_id)
        })?;
    let operator = require_user(db, batch_record.operator_id, ("batch record", batch_record.id)).await?;
    let manufacturing_steps = ManufacturingStepRepository::new(db)
        .find_by_batch_record(batch_record.id)
        .await?;
    let quality_control_tests = QualityControlTestRepository::new(db)
        .find_by_batch_record(batch_record.id)
        .await?;
    let quality_review = QualityReviewRepository::new(db)
        .find_by_batch_record(batch_record.id)
        .await?;

    Ok(BatchRecordWithRelations {
        batch_record,
        work_order,
        operator,
        manufacturing_steps,
        quality_control_tests,
        quality_review,
    })
}

pub async fn quality_review_with_relations<C: ConnectionTrait>(
    db: &C,
    quality_review: quality_review::Model,
) -> Result<QualityReviewWithRelations, ServiceError> {
    let batch_record = BatchRecordRepository::new(db)
        .find_by_id(quality_review.batch_record_id)
        .await?
        .ok_or_else(|| {
            dangling(
                "quality review",
                quality_review.id,
                "batch record",
                quality_review.batch_record_id,
            )
        })?;
    let batch_record = batch_record_with_relations(db, batch_record).await?;
    let reviewer = require_user(db, quality_review.reviewer_id, ("quality review", quality_review.id)).await?;

    Ok(QualityReviewWithRelations {
        quality_review,
        batch_record,
        reviewer,
    })
}

pub async fn work_orders_with_relations<C: ConnectionTrait>(
    db: &C,
    work_orders: Vec<work_order::Model>,
) -> Result<Vec<WorkOrderWithRelations>, ServiceError> {
    try_join_all(
        work_orders
            .into_iter()
            .map(|work_order| work_order_with_relations(db, work_order)),
    )
    .await
}

pub async fn batch_records_with_relations<C: ConnectionTrait>(
    db: &C,
    batch_records: Vec<batch_record::Model>,
) -> Result<Vec<BatchRecordWithRelations>, ServiceError> {
    try_join_all(
        batch_records
            .into_iter()
            .map(|batch_record| batch_record_with_relations(db, batch_record)),
    )
    .await
}

pub async fn quality_reviews_with_relations<C: ConnectionTrait>(
    db: &C,
    reviews: Vec<quality_review::Model>,
) -> Result<Vec<QualityReviewWithRelations>, ServiceError> {
    try_join_all(
        reviews
            .into_iter()
            .map(|review| quality_review_with_relations(db, review)),
    )
    .await
}
