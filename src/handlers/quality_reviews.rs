use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{created_response, success_response, QueryParams, ValidatedJson};
use crate::{
    auth::AuthenticatedUser,
    dto::{CreateQualityReviewRequest, QualityReviewListQuery},
    errors::ServiceError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_quality_reviews).post(create_quality_review))
}

#[utoipa::path(
    get,
    path = "/api/quality-reviews",
    summary = "List quality reviews",
    description = "`pending=true` returns the submitted batch records still awaiting a decision instead. `includeRelations=true` embeds batch record and reviewer.",
    params(QualityReviewListQuery),
    responses(
        (status = 200, description = "Reviews or pending batch records", body = [crate::dto::QualityReviewWithRelations]),
    ),
    tag = "quality-reviews"
)]
pub async fn list_quality_reviews(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<QualityReviewListQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.quality_reviews;
    if query.pending {
        Ok(success_response(service.list_pending().await?))
    } else if query.include_relations {
        Ok(success_response(service.list_reviews_with_relations().await?))
    } else {
        Ok(success_response(service.list_reviews().await?))
    }
}

#[utoipa::path(
    post,
    path = "/api/quality-reviews",
    summary = "Record quality decision",
    description = "approve moves the work order to approved, reject to rejected, hold leaves it under_review. A batch record can be reviewed once.",
    request_body = CreateQualityReviewRequest,
    responses(
        (status = 201, description = "Review recorded", body = crate::entities::quality_review::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Batch record already reviewed", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "quality-reviews"
)]
pub async fn create_quality_review(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateQualityReviewRequest>,
) -> Result<Response, ServiceError> {
    let review = state
        .services
        .quality_reviews
        .create_review(&user.0, request)
        .await?;
    Ok(created_response(review))
}
