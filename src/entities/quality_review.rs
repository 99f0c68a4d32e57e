use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::work_order::WorkOrderStatus;

/// Quality controller's decision on a submitted batch record.
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
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReviewDecision {
    #[sea_orm(string_value = "approve")]
    Approve,
    #[sea_orm(string_value = "reject")]
    Reject,
    #[sea_orm(string_value = "hold")]
    Hold,
}

impl ReviewDecision {
    /// Work order status that follows this decision.
    pub fn resulting_status(&self) -> WorkOrderStatus {
        match self {
            ReviewDecision::Approve => WorkOrderStatus::Approved,
            ReviewDecision::Reject => WorkOrderStatus::Rejected,
            ReviewDecision::Hold => WorkOrderStatus::UnderReview,
        }
    }

    /// Past-tense verb used in activity log details.
    pub fn past_tense(&self) -> &'static str {
        match self {
            ReviewDecision::Approve => "approved",
            ReviewDecision::Reject => "rejected",
            ReviewDecision::Hold => "put on hold",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "quality_reviews")]
#[serde(rename_all = "camelCase")]
#[schema(as = QualityReview)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub batch_record_id: i32,
    pub reviewer_id: i32,
    pub decision: ReviewDecision,
    pub comments: Option<String>,
    pub reviewed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batch_record::Entity",
        from = "Column::BatchRecordId",
        to = "super::batch_record::Column::Id"
    )]
    BatchRecord,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewerId",
        to = "super::user::Column::Id"
    )]
    Reviewer,
}

impl Related<super::batch_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchRecord.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
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
