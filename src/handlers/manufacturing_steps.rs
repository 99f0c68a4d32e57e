use axum::{extract::State, response::Response, routing::{patch, post}, Router};

use super::common::{created_response, success_response, IdPath, ValidatedJson};
use crate::{
    auth::AuthenticatedUser,
    dto::{CreateManufacturingStepRequest, UpdateManufacturingStepRequest},
    errors::ServiceError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_manufacturing_step))
        .route("/:id", patch(update_manufacturing_step))
}

#[utoipa::path(
    post,
    path = "/api/manufacturing-steps",
    summary = "Add manufacturing step",
    request_body = CreateManufacturingStepRequest,
    responses(
        (status = 201, description = "Step added", body = crate::entities::manufacturing_step::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "manufacturing-steps"
)]
pub async fn create_manufacturing_step(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateManufacturingStepRequest>,
) -> Result<Response, ServiceError> {
    let step = state
        .services
        .manufacturing_steps
        .create_step(&user.0, request)
        .await?;
    Ok(created_response(step))
}

#[utoipa::path(
    patch,
    path = "/api/manufacturing-steps/{id}",
    summary = "Complete manufacturing step",
    description = "Setting completedAt completes the step and recomputes the batch record's completion percentage.",
    params(("id" = i32, Path, description = "Manufacturing step ID")),
    request_body = UpdateManufacturingStepRequest,
    responses(
        (status = 200, description = "Updated step", body = crate::entities::manufacturing_step::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Step or user not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "manufacturing-steps"
)]
pub async fn update_manufacturing_step(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateManufacturingStepRequest>,
) -> Result<Response, ServiceError> {
    let step = state
        .services
        .manufacturing_steps
        .update_step(&user.0, id, request)
        .await?;
    Ok(success_response(step))
}
