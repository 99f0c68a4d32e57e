#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use batchtrack_api::{
    auth::USER_ID_HEADER,
    build_router,
    config::AppConfig,
    db,
    services::seed::{seed_reference_data, ReferenceData},
    AppState,
};

/// Seeded operator used as the default session user.
pub const OPERATOR: i32 = 1;
/// Second seeded operator.
pub const SECOND_OPERATOR: i32 = 2;
/// Seeded quality controller.
pub const QC: i32 = 3;
/// "Hydrating Moisturizer": product code `HY`.
pub const MOISTURIZER: i32 = 1;

/// Application wired the way `main` wires it, backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub reference: ReferenceData,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

        let mut cfg = AppConfig::new(url, "test".to_string());
        cfg.cors_allow_any_origin = true;
        cfg.db_max_connections = 4;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let reference = seed_reference_data(&pool)
            .await
            .expect("seed users and products");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = build_router(state.clone()).expect("build router");

        Self {
            router,
            state,
            reference,
            _dir: dir,
        }
    }

    /// Sends a request, optionally as `user_id`, and decodes the JSON body
    /// (`Value::Null` when empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        user_id: Option<i32>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header(USER_ID_HEADER, id.to_string());
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("serialize request body"))
        } else {
            Body::empty()
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router error during test request");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), Some(OPERATOR)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body), Some(OPERATOR)).await
    }

    /// Creates a planned work order for the moisturizer and returns its body.
    pub async fn create_work_order(&self, batch_size: i32) -> Value {
        let (status, body) = self
            .post(
                "/api/work-orders",
                json!({
                    "productId": MOISTURIZER,
                    "batchSize": batch_size,
                    "assignedOperatorId": OPERATOR,
                    "startDate": "2024-06-01T08:00:00Z",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create work order: {body}");
        body
    }

    /// Opens a batch record with the default steps and tests.
    pub async fn create_batch_record(&self, work_order_id: i64) -> Value {
        let (status, body) = self
            .post("/api/batch-records", json!({ "workOrderId": work_order_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create batch record: {body}");
        body
    }

    /// Work order plus batch record, with the record submitted for review.
    pub async fn submitted_batch(&self) -> (Value, Value) {
        let work_order = self.create_work_order(500).await;
        let record = self.create_batch_record(id_of(&work_order)).await;
        let (status, record) = self
            .patch(
                &format!("/api/batch-records/{}", id_of(&record)),
                json!({ "isComplete": true }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "submit batch record: {record}");
        (work_order, record)
    }
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("body has numeric id")
}

/// Work order numbers carry the year they were created in.
pub fn current_year() -> i32 {
    Utc::now().year()
}
