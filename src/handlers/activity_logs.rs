use axum::{extract::State, response::Response, routing::get, Router};

use super::common::{success_response, QueryParams};
use crate::{dto::RecentActivityQuery, errors::ServiceError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/recent", get(recent_activity))
}

#[utoipa::path(
    get,
    path = "/api/activity-logs/recent",
    summary = "Recent activity",
    description = "Newest first, each entry with its author. `limit` defaults to 10 and is clamped to the configured maximum.",
    params(RecentActivityQuery),
    responses(
        (status = 200, description = "Activity log entries", body = [crate::dto::ActivityLogWithUser]),
        (status = 400, description = "Invalid limit", body = crate::errors::ErrorResponse),
    ),
    tag = "activity-logs"
)]
pub async fn recent_activity(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecentActivityQuery>,
) -> Result<Response, ServiceError> {
    let limit = state.config.activity_log_limit(query.limit);
    let entries = state.services.activity_logs.recent(limit).await?;
    Ok(success_response(entries))
}
