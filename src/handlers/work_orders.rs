use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{created_response, success_response, IdPath, QueryParams, ValidatedJson};
use crate::{
    auth::AuthenticatedUser,
    dto::{CreateWorkOrderRequest, RelationsQuery, UpdateWorkOrderRequest, WorkOrderListQuery},
    errors::ServiceError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_work_orders).post(create_work_order))
        .route("/:id", get(get_work_order).patch(update_work_order))
        .route("/:id/batch-record", get(get_work_order_batch_record))
}

#[utoipa::path(
    get,
    path = "/api/work-orders",
    summary = "List work orders",
    description = "Newest first. With `includeRelations=true` each entry embeds product, operator and batch record.",
    params(WorkOrderListQuery),
    responses(
        (status = 200, description = "Work orders", body = [crate::dto::WorkOrderWithRelations]),
        (status = 400, description = "Invalid query", body = crate::errors::ErrorResponse),
    ),
    tag = "work-orders"
)]
pub async fn list_work_orders(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WorkOrderListQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.work_orders;
    let status = query.status_filter();
    if query.include_relations {
        Ok(success_response(service.list_work_orders_with_relations(status).await?))
    } else {
        Ok(success_response(service.list_work_orders(status).await?))
    }
}

#[utoipa::path(
    post,
    path = "/api/work-orders",
    summary = "Create work order",
    description = "Assigns the next WO-<year>-<seq> number and starts the order in `planned` unless a status is given.",
    request_body = CreateWorkOrderRequest,
    responses(
        (status = 201, description = "Work order created", body = crate::entities::work_order::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product or operator not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "work-orders"
)]
pub async fn create_work_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateWorkOrderRequest>,
) -> Result<Response, ServiceError> {
    let work_order = state
        .services
        .work_orders
        .create_work_order(&user.0, request)
        .await?;
    Ok(created_response(work_order))
}

#[utoipa::path(
    get,
    path = "/api/work-orders/{id}",
    summary = "Get work order",
    params(("id" = i32, Path, description = "Work order ID"), RelationsQuery),
    responses(
        (status = 200, description = "Work order", body = crate::dto::WorkOrderWithRelations),
        (status = 404, description = "Work order not found", body = crate::errors::ErrorResponse),
    ),
    tag = "work-orders"
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<RelationsQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.work_orders;
    if query.include_relations {
        Ok(success_response(service.get_work_order_with_relations(id).await?))
    } else {
        Ok(success_response(service.get_work_order(id).await?))
    }
}

#[utoipa::path(
    patch,
    path = "/api/work-orders/{id}",
    summary = "Update work order",
    description = "Only status, notes, endDate and assignedOperatorId can change. A status change is a manual override.",
    params(("id" = i32, Path, description = "Work order ID")),
    request_body = UpdateWorkOrderRequest,
    responses(
        (status = 200, description = "Updated work order", body = crate::entities::work_order::Model),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Work order or operator not found", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "work-orders"
)]
pub async fn update_work_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateWorkOrderRequest>,
) -> Result<Response, ServiceError> {
    let work_order = state
        .services
        .work_orders
        .update_work_order(&user.0, id, request)
        .await?;
    Ok(success_response(work_order))
}

#[utoipa::path(
    get,
    path = "/api/work-orders/{id}/batch-record",
    summary = "Batch record of a work order",
    params(("id" = i32, Path, description = "Work order ID"), RelationsQuery),
    responses(
        (status = 200, description = "Batch record", body = crate::dto::BatchRecordWithRelations),
        (status = 404, description = "Work order or batch record not found", body = crate::errors::ErrorResponse),
    ),
    tag = "work-orders"
)]
pub async fn get_work_order_batch_record(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    QueryParams(query): QueryParams<RelationsQuery>,
) -> Result<Response, ServiceError> {
    let service = &state.services.batch_records;
    if query.include_relations {
        Ok(success_response(service.get_for_work_order_with_relations(id).await?))
    } else {
        Ok(success_response(service.get_for_work_order(id).await?))
    }
}
