use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{success_response, IdPath};
use crate::{auth::AuthenticatedUser, errors::ServiceError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
        .route("/products", get(list_products))
        .route("/current-user", get(current_user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    summary = "List users",
    responses(
        (status = 200, description = "All users", body = [crate::entities::user::Model]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let users = state.services.reference.list_users().await?;
    Ok(success_response(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    summary = "Get user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = crate::entities::user::Model),
        (status = 400, description = "Malformed id", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, ServiceError> {
    let user = state.services.reference.get_user(id).await?;
    Ok(success_response(user))
}

#[utoipa::path(
    get,
    path = "/api/products",
    summary = "List products",
    responses(
        (status = 200, description = "Product catalogue", body = [crate::entities::product::Model]),
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let products = state.services.reference.list_products().await?;
    Ok(success_response(products))
}

#[utoipa::path(
    get,
    path = "/api/current-user",
    summary = "Current user",
    description = "The user named by the `x-user-id` header",
    responses(
        (status = 200, description = "Session user", body = crate::entities::user::Model),
        (status = 401, description = "Missing or unknown user", body = crate::errors::ErrorResponse),
    ),
    security(("UserId" = [])),
    tag = "users"
)]
pub async fn current_user(user: AuthenticatedUser) -> Response {
    success_response(user.into_inner())
}
