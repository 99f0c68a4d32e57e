use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{created_response, success_response, IdPath, QueryParams, ValidatedJson};
use crate::{
    auth::AuthenticatedUser,
    dto::{CreateBatchRecordRequest, RelationsQuery, UpdateBatchRecordRequest},
    errors::ServiceError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batch_records).post(create_batch_record))
        .route("/:id", get(get_batch_record).patch(update_batch_record))
        .route("/:id/manufacturing-steps", get(list_manufacturing_steps))
        .route("/:id/quality-control-tests", get(list_quality_control_tests))
        .route("/:id/quality-review", get(get_quality_review))
}

#[utoipa::path(
    get,
    path = "/api/batch-records",
    summary = "List batch records",
    params(RelationsQuery),
    responses(
        (status = 200, description = "Batch records, newest first", body = [crate::dto::BatchRecordWithRelations]),
    ),
    tag = "batch-records"
)]
pub async fn list_batch_records(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RelationsQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.batch_records;
    if query.include_relations {
        Ok(success_response(service.list_batch_records_with_relations().await?))
    } else {
        Ok(success_response(service.list_batch_records().await?))
    }
}

#[utoipa::path(
    post,
    path = "/api/batch-records",
    summary = "Open batch record",
    description = "Creates the single batch record of a work order, seeding the standard steps and tests unless lists are supplied. A planned work order moves to in_progress.",
    request_body = CreateBatchRecordRequest,
    responses(
        (status = 201, description = "Batch record created", body = crate::entities::batch_record::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Work order, product or operator not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Work order already has a batch record", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "batch-records"
)]
pub async fn create_batch_record(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateBatchRecordRequest>,
) -> Result<Response, ServiceError> {
    let record = state
        .services
        .batch_records
        .create_batch_record(&user.0, request)
        .await?;
    Ok(created_response(record))
}

#[utoipa::path(
    get,
    path = "/api/batch-records/{id}",
    summary = "Get batch record",
    params(("id" = i32, Path, description = "Batch record ID"), RelationsQuery),
    responses(
        (status = 200, description = "Batch record", body = crate::dto::BatchRecordWithRelations),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    tag = "batch-records"
)]
pub async fn get_batch_record(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<RelationsQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.batch_records;
    if query.include_relations {
        Ok(success_response(service.get_batch_record_with_relations(id).await?))
    } else {
        Ok(success_response(service.get_batch_record(id).await?))
    }
}

#[utoipa::path(
    patch,
    path = "/api/batch-records/{id}",
    summary = "Update batch record",
    description = "Setting isComplete=true submits the record: progress becomes 100, submittedAt is stamped and the work order moves to under_review.",
    params(("id" = i32, Path, description = "Batch record ID")),
    request_body = UpdateBatchRecordRequest,
    responses(
        (status = 200, description = "Updated batch record", body = crate::entities::batch_record::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "batch-records"
)]
pub async fn update_batch_record(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateBatchRecordRequest>,
) -> Result<Response, ServiceError> {
    let record = state
        .services
        .batch_records
        .update_batch_record(&user.0, id, request)
        .await?;
    Ok(success_response(record))
}

#[utoipa::path(
    get,
    path = "/api/batch-records/{id}/manufacturing-steps",
    summary = "Steps of a batch record",
    params(("id" = i32, Path, description = "Batch record ID")),
    responses(
        (status = 200, description = "Steps in process order", body = [crate::entities::manufacturing_step::Model]),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    tag = "batch-records"
)]
pub async fn list_manufacturing_steps(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, ServiceError> {
    let steps = state.services.batch_records.list_steps(id).await?;
    Ok(success_response(steps))
}

#[utoipa::path(
    get,
    path = "/api/batch-records/{id}/quality-control-tests",
    summary = "Tests of a batch record",
    params(("id" = i32, Path, description = "Batch record ID")),
    responses(
        (status = 200, description = "Quality control tests", body = [crate::entities::quality_control_test::Model]),
        (status = 404, description = "Batch record not found", body = crate::errors::ErrorResponse),
    ),
    tag = "batch-records"
)]
pub async fn list_quality_control_tests(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, ServiceError> {
    let tests = state.services.batch_records.list_tests(id).await?;
    Ok(success_response(tests))
}

#[utoipa::path(
    get,
    path = "/api/batch-records/{id}/quality-review",
    summary = "Review of a batch record",
    params(("id" = i32, Path, description = "Batch record ID")),
    responses(
        (status = 200, description = "Quality review", body = crate::entities::quality_review::Model),
        (status = 404, description = "Batch record or review not found", body = crate::errors::ErrorResponse),
    ),
    tag = "batch-records"
)]
pub async fn get_quality_review(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, ServiceError> {
    let review = state.services.batch_records.get_review(id).await?;
    Ok(success_response(review))
}
