// Lifecycle rules shared by the services below
pub mod lifecycle;
pub(crate) mod views;

// Work order lifecycle
pub mod batch_records;
pub mod manufacturing_steps;
pub mod quality_reviews;
pub mod work_orders;

// Read models
pub mod activity_logs;
pub mod dashboard;
pub mod reference;

// Demo data
pub mod seed;
