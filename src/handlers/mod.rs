pub mod activity_logs;
pub mod batch_records;
pub mod common;
pub mod dashboard;
pub mod manufacturing_steps;
pub mod quality_control_tests;
pub mod quality_reviews;
pub mod users;
pub mod work_orders;

use crate::db::DbPool;
use crate::services::{
    activity_logs::ActivityLogService, batch_records::BatchRecordService,
    dashboard::DashboardService, manufacturing_steps::ManufacturingStepService,
    quality_control_tests::QualityControlTestService, quality_reviews::QualityReviewService,
    reference::ReferenceDataService, work_orders::WorkOrderService,
};
use axum::Router;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub reference: Arc<ReferenceDataService>,
    pub work_orders: Arc<WorkOrderService>,
    pub batch_records: Arc<BatchRecordService>,
    pub manufacturing_steps: Arc<ManufacturingStepService>,
    pub quality_control_tests: Arc<QualityControlTestService>,
    pub quality_reviews: Arc<QualityReviewService>,
    pub activity_logs: Arc<ActivityLogService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            reference: Arc::new(ReferenceDataService::new(db_pool.clone())),
            work_orders: Arc::new(WorkOrderService::new(db_pool.clone())),
            batch_records: Arc::new(BatchRecordService::new(db_pool.clone())),
            manufacturing_steps: Arc::new(ManufacturingStepService::new(db_pool.clone())),
            quality_control_tests: Arc::new(QualityControlTestService::new(db_pool.clone())),
            quality_reviews: Arc::new(QualityReviewService::new(db_pool.clone())),
            activity_logs: Arc::new(ActivityLogService::new(db_pool.clone())),
            dashboard: Arc::new(DashboardService::new(db_pool)),
        }
    }
}

/// Every resource router, merged; mounted under `/api`.
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .nest("/work-orders", work_orders::routes())
        .nest("/batch-records", batch_records::routes())
        .nest("/manufacturing-steps", manufacturing_steps::routes())
        .nest("/quality-control-tests", quality_control_tests::routes())
        .nest("/quality-reviews", quality_reviews::routes())
        .nest("/dashboard", dashboard::routes())
        .nest("/activity-logs", activity_logs::routes())
}
