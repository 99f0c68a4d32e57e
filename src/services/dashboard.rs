use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::{
    db::DbPool,
    dto::DashboardStats,
    entities::WorkOrderStatus,
    errors::ServiceError,
    repositories::{BatchRecordRepository, WorkOrderRepository},
};

/// Read-side aggregates, recomputed on every request.
#[derive(Debug, Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let db = self.db_pool.as_ref();
        let work_orders = WorkOrderRepository::new(db);

        let status_counts = work_orders.count_by_status().await?;
        let active_work_orders = status_counts
            .get(WorkOrderStatus::InProgress.as_ref())
            .copied()
            .unwrap_or(0);
        let pending_qc_reviews = BatchRecordRepository::new(db).count_pending_review().await?;
        let completed_this_month = work_orders
            .count_closed_since(start_of_month(Utc::now())?)
            .await?;

        Ok(DashboardStats {
            active_work_orders,
            pending_qc_reviews,
            completed_this_month,
            status_counts,
        })
    }
}

fn start_of_month(now: DateTime<Utc>) -> Result<DateTime<Utc>, ServiceError> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ServiceError::InternalError(format!("no month start for {}", now)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_starts_at_midnight_on_the_first() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 17, 45, 0).unwrap();
        assert_eq!(
            start_of_month(now).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }
}
