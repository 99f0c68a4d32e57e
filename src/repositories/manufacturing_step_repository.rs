use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::manufacturing_step::{
    ActiveModel as StepActiveModel, Column, Entity as ManufacturingStep, Model as StepModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for manufacturing steps
#[derive(Debug)]
pub struct ManufacturingStepRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> ManufacturingStepRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<StepModel>, ServiceError> {
        Ok(ManufacturingStep::find_by_id(id).one(self.get_db()).await?)
    }

    /// Steps of one batch record in process order
    pub async fn find_by_batch_record(&self, batch_record_id: i32) -> Result<Vec<StepModel>, ServiceError> {
        Ok(ManufacturingStep::find()
            .filter(Column::BatchRecordId.eq(batch_record_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, step: StepActiveModel) -> Result<StepModel, ServiceError> {
        Ok(step.insert(self.get_db()).await?)
    }

    pub async fn update(&self, step: StepActiveModel) -> Result<StepModel, ServiceError> {
        Ok(step.update(self.get_db()).await?)
    }

    /// `(completed, total)` step counts for a batch record.
    pub async fn progress(&self, batch_record_id: i32) -> Result<(u64, u64), ServiceError> {
        let total = ManufacturingStep::find()
            .filter(Column::BatchRecordId.eq(batch_record_id))
            .count(self.get_db())
            .await?;
        let completed = ManufacturingStep::find()
            .filter(Column::BatchRecordId.eq(batch_record_id))
            .filter(Column::CompletedAt.is_not_null())
            .count(self.get_db())
            .await?;
        Ok((completed, total))
    }
}

impl<C: ConnectionTrait> Repository<C> for ManufacturingStepRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
