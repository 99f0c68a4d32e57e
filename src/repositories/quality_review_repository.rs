use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::quality_review::{
    ActiveModel as ReviewActiveModel, Column, Entity as QualityReview, Model as ReviewModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for quality reviews. Reviews are insert-only.
#[derive(Debug)]
pub struct QualityReviewRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> QualityReviewRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_batch_record(
        &self,
        batch_record_id: i32,
    ) -> Result<Option<ReviewModel>, ServiceError> {
        Ok(QualityReview::find()
            .filter(Column::BatchRecordId.eq(batch_record_id))
            .one(self.get_db())
            .await?)
    }

    /// Most recent reviews first
    pub async fn find_all(&self) -> Result<Vec<ReviewModel>, ServiceError> {
        Ok(QualityReview::find()
            .order_by_desc(Column::ReviewedAt)
            .order_by_desc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, review: ReviewActiveModel) -> Result<ReviewModel, ServiceError> {
        Ok(review.insert(self.get_db()).await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for QualityReviewRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
