//! Demo data: the shop-floor users, the product catalogue and a handful of work
//! orders at different lifecycle stages.

use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, NotSet, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    dto::{
        CreateBatchRecordRequest, CreateQualityReviewRequest, CreateWorkOrderRequest,
        UpdateBatchRecordRequest, UpdateManufacturingStepRequest, UpdateQualityControlTestRequest,
    },
    entities::{product, user, ReviewDecision, UserRole},
    errors::ServiceError,
    repositories::{ProductRepository, UserRepository},
    services::{
        batch_records::BatchRecordService, manufacturing_steps::ManufacturingStepService,
        quality_control_tests::QualityControlTestService, quality_reviews::QualityReviewService,
        work_orders::WorkOrderService,
    },
};

const DEMO_USERS: [(&str, &str, UserRole); 3] = [
    ("john.cooper", "John Cooper", UserRole::Operator),
    ("maria.johnson", "Maria Johnson", UserRole::Operator),
    ("sara.williams", "Sara Williams", UserRole::QualityController),
];

const DEMO_PRODUCTS: [(&str, &str); 5] = [
    ("Hydrating Moisturizer", "Deep hydration formula for all skin types"),
    ("Vitamin C Serum", "Brightening serum with 15% vitamin C"),
    ("Gentle Cleanser", "Mild cleanser for sensitive skin"),
    ("SPF 50 Sunscreen", "Broad spectrum protection with vitamin E"),
    ("Clay Face Mask", "Deep cleansing mask with kaolin clay"),
];

/// Measurements recorded against the standard test panel, in panel order.
const DEMO_RESULTS: [&str; 4] = ["7.0", "15,000 cP", "White cream", "No growth detected"];

/// Users and products inserted by [`seed_reference_data`].
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub users: Vec<user::Model>,
    pub products: Vec<product::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Users already existed; nothing was written.
    Skipped,
    Seeded {
        users: usize,
        products: usize,
        work_orders: usize,
    },
}

/// Inserts the demo users and products.
pub async fn seed_reference_data<C: ConnectionTrait>(db: &C) -> Result<ReferenceData, ServiceError> {
    let user_repo = UserRepository::new(db);
    let mut users = Vec::with_capacity(DEMO_USERS.len());
    for (username, full_name, role) in DEMO_USERS {
        users.push(
            user_repo
                .create(user::ActiveModel {
                    id: NotSet,
                    username: Set(username.to_string()),
                    full_name: Set(full_name.to_string()),
                    role: Set(role),
                    email: Set(Some(format!("{}@example.com", username))),
                    avatar_url: Set(None),
                    created_at: NotSet,
                })
                .await?,
        );
    }

    let product_repo = ProductRepository::new(db);
    let mut products = Vec::with_capacity(DEMO_PRODUCTS.len());
    for (name, description) in DEMO_PRODUCTS {
        products.push(
            product_repo
                .create(product::ActiveModel {
                    id: NotSet,
                    name: Set(name.to_string()),
                    description: Set(Some(description.to_string())),
                    created_at: NotSet,
                })
                .await?,
        );
    }

    Ok(ReferenceData { users, products })
}

/// Seeds an empty database. Skipped when any user exists.
#[instrument(skip(db_pool))]
pub async fn seed_demo_data(db_pool: Arc<DbPool>) -> Result<SeedOutcome, ServiceError> {
    if UserRepository::new(db_pool.as_ref()).count().await? > 0 {
        info!("Users already present; demo data not seeded");
        return Ok(SeedOutcome::Skipped);
    }

    let txn = db_pool.begin().await.map_err(ServiceError::db_error)?;
    let reference = seed_reference_data(&txn).await?;
    txn.commit().await.map_err(ServiceError::db_error)?;

    let [john, maria, sara] = match reference.users.as_slice() {
        [john, maria, sara] => [john.clone(), maria.clone(), sara.clone()],
        _ => {
            return Err(ServiceError::InternalError(
                "demo users were not created".to_string(),
            ))
        }
    };
    let product_id = |index: usize| reference.products.get(index).map(|p| p.id).unwrap_or(1);

    let work_orders = WorkOrderService::new(db_pool.clone());
    let batch_records = BatchRecordService::new(db_pool.clone());
    let steps = ManufacturingStepService::new(db_pool.clone());
    let tests = QualityControlTestService::new(db_pool.clone());
    let reviews = QualityReviewService::new(db_pool.clone());
    let now = Utc::now();

    let order = |product: usize, batch_size: i32, operator: &user::Model, days_from_now: i64| {
        CreateWorkOrderRequest {
            product_id: product_id(product),
            batch_size,
            assigned_operator_id: operator.id,
            start_date: now + Duration::days(days_from_now),
            end_date: Some(now + Duration::days(days_from_now + 2)),
            notes: None,
            status: None,
        }
    };

    // Approved: fully produced, tested and reviewed.
    let approved = work_orders.create_work_order(&john, order(0, 500, &john, -10)).await?;
    let record = batch_records
        .create_batch_record(&john, batch_request(approved.id))
        .await?;
    complete_steps(&batch_records, &steps, &john, record.id, usize::MAX).await?;
    record_tests(&batch_records, &tests, &sara, record.id).await?;
    submit(&batch_records, &john, record.id).await?;
    reviews
        .create_review(
            &sara,
            CreateQualityReviewRequest {
                batch_record_id: record.id,
                decision: ReviewDecision::Approve,
                comments: Some("All parameters within specification".to_string()),
            },
        )
        .await?;

    // In progress: half way through the process.
    let running = work_orders.create_work_order(&maria, order(1, 200, &maria, -2)).await?;
    let record = batch_records
        .create_batch_record(&maria, batch_request(running.id))
        .await?;
    complete_steps(&batch_records, &steps, &maria, record.id, 3).await?;

    // Under review: submitted, waiting for quality control.
    let submitted = work_orders.create_work_order(&maria, order(3, 300, &maria, -5)).await?;
    let record = batch_records
        .create_batch_record(&maria, batch_request(submitted.id))
        .await?;
    complete_steps(&batch_records, &steps, &maria, record.id, usize::MAX).await?;
    submit(&batch_records, &maria, record.id).await?;

    // Planned: not started yet.
    work_orders.create_work_order(&john, order(2, 1000, &john, 7)).await?;

    let outcome = SeedOutcome::Seeded {
        users: reference.users.len(),
        products: reference.products.len(),
        work_orders: 4,
    };
    info!(?outcome, "Demo data seeded");
    Ok(outcome)
}

fn batch_request(work_order_id: i32) -> CreateBatchRecordRequest {
    CreateBatchRecordRequest {
        work_order_id,
        operator_id: None,
        manufacturing_steps: None,
        quality_control_tests: None,
    }
}

async fn complete_steps(
    batch_records: &BatchRecordService,
    steps: &ManufacturingStepService,
    operator: &user::Model,
    batch_record_id: i32,
    how_many: usize,
) -> Result<(), ServiceError> {
    for step in batch_records
        .list_steps(batch_record_id)
        .await?
        .into_iter()
        .take(how_many)
    {
        steps
            .update_step(
                operator,
                step.id,
                UpdateManufacturingStepRequest {
                    completed_at: Some(Utc::now()),
                    completed_by: None,
                },
            )
            .await?;
    }
    Ok(())
}

async fn record_tests(
    batch_records: &BatchRecordService,
    tests: &QualityControlTestService,
    controller: &user::Model,
    batch_record_id: i32,
) -> Result<(), ServiceError> {
    let panel = batch_records.list_tests(batch_record_id).await?;
    for (test, result) in panel.into_iter().zip(DEMO_RESULTS) {
        tests
            .update_test(
                controller,
                test.id,
                UpdateQualityControlTestRequest {
                    result: Some(Some(result.to_string())),
                    is_passed: Some(Some(true)),
                    completed_at: Some(Utc::now()),
                    completed_by: None,
                },
            )
            .await?;
    }
    Ok(())
}

async fn submit(
    batch_records: &BatchRecordService,
    operator: &user::Model,
    batch_record_id: i32,
) -> Result<(), ServiceError> {
    batch_records
        .update_batch_record(
            operator,
            batch_record_id,
            UpdateBatchRecordRequest {
                is_complete: Some(true),
                ..Default::default()
            },
        )
        .await?;
    Ok(())
}
