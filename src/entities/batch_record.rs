use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Execution record of a single work order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "batch_records")]
#[serde(rename_all = "camelCase")]
#[schema(as = BatchRecord)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub work_order_id: i32,
    pub operator_id: i32,
    /// `<PP>-<YY>-<NNN>-<batchSize>`
    #[sea_orm(unique)]
    pub batch_number: String,
    /// Always within `0..=100`.
    pub completion_percentage: i32,
    pub is_complete: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_order::Entity",
        from = "Column::WorkOrderId",
        to = "super::work_order::Column::Id"
    )]
    WorkOrder,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OperatorId",
        to = "super::user::Column::Id"
    )]
    Operator,
    #[sea_orm(has_many = "super::manufacturing_step::Entity")]
    ManufacturingSteps,
    #[sea_orm(has_many = "super::quality_control_test::Entity")]
    QualityControlTests,
    #[sea_orm(has_one = "super::quality_review::Entity")]
    QualityReview,
}

impl Related<super::work_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrder.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::manufacturing_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManufacturingSteps.def()
    }
}

impl Related<super::quality_control_test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityControlTests.def()
    }
}

impl Related<super::quality_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityReview.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            active_model.created_at = Set(now);
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
