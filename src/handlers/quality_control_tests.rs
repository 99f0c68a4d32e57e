use axum::{extract::State, response::Response, routing::{patch, post}, Router};

use super::common::{created_response, success_response, IdPath, ValidatedJson};
use crate::{
    auth::AuthenticatedUser,
    dto::{CreateQualityControlTestRequest, UpdateQualityControlTestRequest},
    errors::ServiceError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quality_control_test))
        .route("/:id", patch(update_quality_control_test))
}

#[utoipa::path(
    post,
    path = "/api/quality-control-tests",
    summary = "Add quality control test",
    request_body = CreateQualityControlTestRequest,
    responses(
        (status = 201, description = "Test added", body = crate::entities::quality_control_test::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "quality-control-tests"
)]
pub async fn create_quality_control_test(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateQualityControlTestRequest>,
) -> Result<Response, ServiceError> {
    let test = state
        .services
        .quality_control_tests
        .create_test(&user.0, request)
        .await?;
    Ok(created_response(test))
}

#[utoipa::path(
    patch,
    path = "/api/quality-control-tests/{id}",
    summary = "Record quality control result",
    description = "isPassed is tri-state: true, false or null for not evaluated. It is not checked against acceptableRange.",
    params(("id" = i32, Path, description = "Quality control test ID")),
    request_body = UpdateQualityControlTestRequest,
    responses(
        (status = 200, description = "Updated test", body = crate::entities::quality_control_test::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Test or user not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "quality-control-tests"
)]
pub async fn update_quality_control_test(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateQualityControlTestRequest>,
) -> Result<Response, ServiceError> {
    let test = state
        .services
        .quality_control_tests
        .update_test(&user.0, id, request)
        .await?;
    Ok(success_response(test))
}
