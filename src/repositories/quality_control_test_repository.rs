use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::quality_control_test::{
    ActiveModel as TestActiveModel, Column, Entity as QualityControlTest, Model as TestModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for quality control tests
#[derive(Debug)]
pub struct QualityControlTestRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> QualityControlTestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<TestModel>, ServiceError> {
        Ok(QualityControlTest::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_by_batch_record(&self, batch_record_id: i32) -> Result<Vec<TestModel>, ServiceError> {
        Ok(QualityControlTest::find()
            .filter(Column::BatchRecordId.eq(batch_record_id))
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, test: TestActiveModel) -> Result<TestModel, ServiceError> {
        Ok(test.insert(self.get_db()).await?)
    }

    pub async fn update(&self, test: TestActiveModel) -> Result<TestModel, ServiceError> {
        Ok(test.update(self.get_db()).await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for QualityControlTestRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
