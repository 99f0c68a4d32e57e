use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for the product catalogue
#[derive(Debug)]
pub struct ProductRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError> {
        Ok(Product::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Ok(Product::find()
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, product: ProductActiveModel) -> Result<ProductModel, ServiceError> {
        Ok(product.insert(self.get_db()).await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for ProductRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
