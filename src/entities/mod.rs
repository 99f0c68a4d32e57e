pub mod activity_log;
pub mod batch_record;
pub mod manufacturing_step;
pub mod product;
pub mod quality_review;
pub mod user;
pub mod work_order;

pub use activity_log::{ActivityType, EntityKind};
pub use quality_review::ReviewDecision;
pub use user::UserRole;
pub use work_order::WorkOrderStatus;
