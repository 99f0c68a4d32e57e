use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, QuerySelect, Set,
};

use crate::entities::activity_log::{
    ActiveModel as ActivityLogActiveModel, ActivityType, Column, EntityKind,
    Entity as ActivityLog, Model as ActivityLogModel,
};
use crate::entities::user;
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// An audit entry about to be appended.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: i32,
    pub activity_type: ActivityType,
    pub entity_type: EntityKind,
    pub entity_id: i32,
    pub details: String,
}

/// Append-only access to the activity log
#[derive(Debug)]
pub struct ActivityLogRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> ActivityLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn append(&self, activity: NewActivity) -> Result<ActivityLogModel, ServiceError> {
        let entry = ActivityLogActiveModel {
            id: NotSet,
            user_id: Set(activity.user_id),
            activity_type: Set(activity.activity_type),
            entity_id: Set(Some(activity.entity_id)),
            entity_type: Set(Some(activity.entity_type)),
            details: Set(Some(activity.details)),
            created_at: NotSet,
        };
        Ok(entry.insert(self.get_db()).await?)
    }

    /// Newest entries first, each paired with its author.
    pub async fn find_recent(
        &self,
        limit: u64,
    ) -> Result<Vec<(ActivityLogModel, Option<user::Model>)>, ServiceError> {
        Ok(ActivityLog::find()
            .find_also_related(user::Entity)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(self.get_db())
            .await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for ActivityLogRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
