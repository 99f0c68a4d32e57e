use std::sync::Arc;
use tracing::instrument;

use crate::{
    db::DbPool,
    entities::{product, user},
    errors::ServiceError,
    repositories::{ProductRepository, UserRepository},
};

/// Read access to users and products.
#[derive(Debug, Clone)]
pub struct ReferenceDataService {
    db_pool: Arc<DbPool>,
}

impl ReferenceDataService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<user::Model>, ServiceError> {
        UserRepository::new(self.db_pool.as_ref()).find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i32) -> Result<user::Model, ServiceError> {
        UserRepository::new(self.db_pool.as_ref())
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        ProductRepository::new(self.db_pool.as_ref()).find_all().await
    }
}
