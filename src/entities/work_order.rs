use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a work order.
///
/// The usual path is `planned -> in_progress -> under_review -> approved | rejected`.
/// `completed` exists for manual overrides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 6] = [
        WorkOrderStatus::Planned,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::UnderReview,
        WorkOrderStatus::Approved,
        WorkOrderStatus::Rejected,
    ];

    /// Approved and rejected orders have received a final quality decision.
    pub fn is_closed(&self) -> bool {
        matches!(self, WorkOrderStatus::Approved | WorkOrderStatus::Rejected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "work_orders")]
#[serde(rename_all = "camelCase")]
#[schema(as = WorkOrder)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `WO-<year>-<seq>`, assigned at creation and never changed.
    #[sea_orm(unique)]
    pub work_order_number: String,
    pub product_id: i32,
    pub batch_size: i32,
    pub assigned_operator_id: i32,
    pub status: WorkOrderStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Last time `status` was written.
    pub status_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedOperatorId",
        to = "super::user::Column::Id"
    )]
    Operator,
    #[sea_orm(has_one = "super::batch_record::Entity")]
    BatchRecord,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
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
        let now = Utc::now();

        if insert {
            active_model.created_at = Set(now);
        }
        if insert || active_model.status.is_set() {
            active_model.status_changed_at = Set(now);
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
