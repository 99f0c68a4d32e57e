use sea_orm::ConnectionTrait;

pub mod activity_log_repository;
pub mod batch_record_repository;
pub mod manufacturing_step_repository;
pub mod product_repository;
pub mod quality_control_test_repository;
pub mod quality_review_repository;
pub mod user_repository;
pub mod work_order_repository;

pub use activity_log_repository::{ActivityLogRepository, NewActivity};
pub use batch_record_repository::BatchRecordRepository;
pub use manufacturing_step_repository::ManufacturingStepRepository;
pub use product_repository::ProductRepository;
pub use quality_control_test_repository::QualityControlTestRepository;
pub use quality_review_repository::QualityReviewRepository;
pub use user_repository::UserRepository;
pub use work_order_repository::WorkOrderRepository;

/// Repository trait for common database operations.
///
/// Repositories borrow any `ConnectionTrait`, so the same queries run against the
/// pool or inside an open transaction.
pub trait Repository<C: ConnectionTrait> {
    fn get_db(&self) -> &C;
}

#[derive(Debug)]
pub struct BaseRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BaseRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }
}

impl<C: ConnectionTrait> Repository<C> for BaseRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.db
    }
}
