use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::entities::batch_record::{
    self, ActiveModel as BatchRecordActiveModel, Column, Entity as BatchRecord,
    Model as BatchRecordModel,
};
use crate::entities::{quality_review, work_order, WorkOrderStatus};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for batch record operations
#[derive(Debug)]
pub struct BatchRecordRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> BatchRecordRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a batch record by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<BatchRecordModel>, ServiceError> {
        Ok(BatchRecord::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_by_work_order(
        &self,
        work_order_id: i32,
    ) -> Result<Option<BatchRecordModel>, ServiceError> {
        Ok(BatchRecord::find()
            .filter(Column::WorkOrderId.eq(work_order_id))
            .one(self.get_db())
            .await?)
    }

    /// Newest first
    pub async fn find_all(&self) -> Result<Vec<BatchRecordModel>, ServiceError> {
        Ok(BatchRecord::find()
            .order_by_desc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(
        &self,
        batch_record: BatchRecordActiveModel,
    ) -> Result<BatchRecordModel, ServiceError> {
        Ok(batch_record.insert(self.get_db()).await?)
    }

    pub async fn update(
        &self,
        batch_record: BatchRecordActiveModel,
    ) -> Result<BatchRecordModel, ServiceError> {
        Ok(batch_record.update(self.get_db()).await?)
    }

    /// Complete batch records with no review whose work order awaits review.
    pub async fn find_pending_review(&self) -> Result<Vec<BatchRecordModel>, ServiceError> {
        Ok(Self::pending_review_query()
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn count_pending_review(&self) -> Result<u64, ServiceError> {
        Ok(Self::pending_review_query().count(self.get_db()).await?)
    }

    fn pending_review_query() -> Select<BatchRecord> {
        BatchRecord::find()
            .join(JoinType::InnerJoin, batch_record::Relation::WorkOrder.def())
            .join(JoinType::LeftJoin, batch_record::Relation::QualityReview.def())
            .filter(Column::IsComplete.eq(true))
            .filter(work_order::Column::Status.eq(WorkOrderStatus::UnderReview))
            .filter(quality_review::Column::Id.is_null())
    }
}

impl<C: ConnectionTrait> Repository<C> for BatchRecordRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
