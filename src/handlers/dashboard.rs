use axum::{extract::State, response::Response, routing::get, Router};

use super::common::success_response;
use crate::{errors::ServiceError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(get_dashboard_stats))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    summary = "Dashboard statistics",
    responses(
        (status = 200, description = "Current counts", body = crate::dto::DashboardStats),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let stats = state.services.dashboard.stats().await?;
    Ok(success_response(stats))
}
