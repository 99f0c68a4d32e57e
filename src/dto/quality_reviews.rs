use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::BatchRecordWithRelations;
use crate::entities::{quality_review, user, ReviewDecision};

/// The reviewer is the acting user; `reviewedAt` is set by the server.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQualityReviewRequest {
    pub batch_record_id: i32,
    pub decision: ReviewDecision,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub comments: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QualityReviewListQuery {
    #[serde(default)]
    pub include_relations: bool,
    /// List batch records awaiting review instead of reviews
    #[serde(default)]
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityReviewWithRelations {
    #[serde(flatten)]
    pub quality_review: quality_review::Model,
    pub batch_record: BatchRecordWithRelations,
    pub reviewer: user::Model,
}
