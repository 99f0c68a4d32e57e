use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::user::{ActiveModel as UserActiveModel, Column, Entity as User, Model as UserModel};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for user lookups
#[derive(Debug)]
pub struct UserRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, ServiceError> {
        Ok(User::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, ServiceError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(self.get_db())
            .await?)
    }

    /// All users ordered by id
    pub async fn find_all(&self) -> Result<Vec<UserModel>, ServiceError> {
        Ok(User::find()
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(User::find().count(self.get_db()).await?)
    }

    pub async fn create(&self, user: UserActiveModel) -> Result<UserModel, ServiceError> {
        Ok(user.insert(self.get_db()).await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for UserRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
