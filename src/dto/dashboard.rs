use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Work orders currently `in_progress`
    pub active_work_orders: u64,
    /// Complete batch records without a review whose work order is `under_review`
    pub pending_qc_reviews: u64,
    /// Work orders approved or rejected since the first of this month (UTC)
    pub completed_this_month: u64,
    /// Every status, zero-filled
    #[schema(example = json!({"planned": 2, "in_progress": 1, "completed": 0, "under_review": 1, "approved": 3, "rejected": 0}))]
    pub status_counts: BTreeMap<String, u64>,
}
