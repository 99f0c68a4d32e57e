use std::sync::Arc;
use tracing::{instrument, warn};

use crate::{
    db::DbPool, dto::ActivityLogWithUser, errors::ServiceError,
    repositories::ActivityLogRepository,
};

#[derive(Debug, Clone)]
pub struct ActivityLogService {
    db_pool: Arc<DbPool>,
}

impl ActivityLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Latest `limit` entries, newest first. The caller clamps `limit`.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: u64) -> Result<Vec<ActivityLogWithUser>, ServiceError> {
        let rows = ActivityLogRepository::new(self.db_pool.as_ref())
            .find_recent(limit)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(activity_log, user)| match user {
                Some(user) => Some(ActivityLogWithUser { activity_log, user }),
                None => {
                    warn!(activity_log_id = activity_log.id, "Activity log entry without author skipped");
                    None
                }
            })
            .collect())
    }
}
