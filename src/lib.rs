//! BatchTrack API Library
//!
//! Work order and batch record tracking for cosmetic and pharmaceutical
//! manufacturing: planning, production steps, quality control tests and the
//! final quality decision, with an audit trail of every change.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::Utc;
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::errors::ServiceError;

// The local `tracing` module shadows the crate at the root; log via `::tracing`.

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Body of `/health` and `/api/status`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// `ok`, `healthy` or `unhealthy`
    #[schema(example = "healthy")]
    pub status: String,
    pub service: String,
    pub version: String,
    pub environment: String,
    /// Database reachability; absent on `/api/status`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub timestamp: String,
}

impl StatusResponse {
    fn new(status: &str, environment: &str, database: Option<&str>) -> Self {
        Self {
            status: status.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: environment.to_string(),
            database: database.map(str::to_string),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    handlers::resource_routes().route("/status", get(api_status))
}

/// Builds the full application: API, health, Swagger UI and the middleware
/// stack. `main` and the integration tests share this.
pub fn build_router(state: AppState) -> Result<Router, ServiceError> {
    let cors = cors_layer(&state.config)?;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        // Outermost, so every span and error body sees the request id
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state);

    Ok(app)
}

fn cors_layer(cfg: &config::AppConfig) -> Result<CorsLayer, ServiceError> {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        return Ok(CorsLayer::permissive());
    }

    ::tracing::error!(
        "Missing CORS configuration; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
    );
    Err(ServiceError::InternalError(
        "Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
            .to_string(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/status",
    summary = "Service status",
    responses((status = 200, description = "Service is up", body = StatusResponse)),
    tag = "health"
)]
pub async fn api_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::new("ok", &state.config.environment, None))
}

#[utoipa::path(
    get,
    path = "/health",
    summary = "Health check",
    description = "Pings the database. Answers 503 when it is unreachable.",
    responses(
        (status = 200, description = "Healthy", body = StatusResponse),
        (status = 503, description = "Database unreachable", body = StatusResponse),
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    let environment = &state.config.environment;
    match db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusResponse::new("healthy", environment, Some("healthy"))),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusResponse::new("unhealthy", environment, Some("unhealthy"))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_requires_origins_outside_development() {
        let cfg = config::AppConfig::new("sqlite::memory:".into(), "production".into());
        assert!(cors_layer(&cfg).is_err());

        let mut cfg = cfg;
        cfg.cors_allowed_origins = Some("https://plant.example.com, ".into());
        assert!(cors_layer(&cfg).is_ok());
    }

    #[test]
    fn development_falls_back_to_permissive_cors() {
        let cfg = config::AppConfig::new("sqlite::memory:".into(), "development".into());
        assert!(cors_layer(&cfg).is_ok());
    }

    #[test]
    fn status_response_omits_database_when_not_checked() {
        let body = serde_json::to_value(StatusResponse::new("ok", "test", None)).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "batchtrack-api");
        assert!(body.get("database").is_none());
    }
}
