use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(48))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityType {
    #[sea_orm(string_value = "work_order_created")]
    WorkOrderCreated,
    #[sea_orm(string_value = "work_order_updated")]
    WorkOrderUpdated,
    #[sea_orm(string_value = "work_order_status_changed")]
    WorkOrderStatusChanged,
    #[sea_orm(string_value = "batch_record_created")]
    BatchRecordCreated,
    #[sea_orm(string_value = "batch_record_updated")]
    BatchRecordUpdated,
    #[sea_orm(string_value = "batch_record_submitted")]
    BatchRecordSubmitted,
    #[sea_orm(string_value = "manufacturing_step_completed")]
    ManufacturingStepCompleted,
    #[sea_orm(string_value = "quality_test_completed")]
    QualityTestCompleted,
    #[sea_orm(string_value = "quality_review_completed")]
    QualityReviewCompleted,
}

/// Kind of record an activity log entry points at.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    #[sea_orm(string_value = "work_order")]
    WorkOrder,
    #[sea_orm(string_value = "batch_record")]
    BatchRecord,
    #[sea_orm(string_value = "manufacturing_step")]
    ManufacturingStep,
    #[sea_orm(string_value = "quality_control_test")]
    QualityControlTest,
    #[sea_orm(string_value = "quality_review")]
    QualityReview,
}

/// Append-only audit trail entry. Rows are never updated.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "activity_logs")]
#[serde(rename_all = "camelCase")]
#[schema(as = ActivityLog)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub activity_type: ActivityType,
    pub entity_id: Option<i32>,
    pub entity_type: Option<EntityKind>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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
