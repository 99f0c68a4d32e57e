use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ordered task of a batch record's production process.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "manufacturing_steps")]
#[serde(rename_all = "camelCase")]
#[schema(as = ManufacturingStep)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub batch_record_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<i32>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Model {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batch_record::Entity",
        from = "Column::BatchRecordId",
        to = "super::batch_record::Column::Id"
    )]
    BatchRecord,
}

impl Related<super::batch_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchRecord.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        if insert {
            active_model.created_at = Set(Utc::now());
        }
        Ok(active_model)
    }
}
