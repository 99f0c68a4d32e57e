//! Error contract: every failure answers with the JSON error body.

mod common;

use axum::http::{Method, StatusCode};
use common::{id_of, TestApp, MOISTURIZER, OPERATOR};
use serde_json::{json, Value};

fn assert_error_body(body: &Value, error: &str) {
    assert_eq!(body["error"], error, "{body}");
    assert!(body["message"].is_string(), "{body}");
    assert!(body["timestamp"].is_string(), "{body}");
}

#[tokio::test]
async fn mutations_require_a_known_user() {
    let app = TestApp::new().await;
    let body = json!({
        "productId": MOISTURIZER,
        "batchSize": 10,
        "assignedOperatorId": OPERATOR,
        "startDate": "2024-06-01"
    });

    let (status, missing) = app
        .request(Method::POST, "/api/work-orders", Some(body.clone()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error_body(&missing, "Unauthorized");

    let (status, unknown) = app
        .request(Method::POST, "/api/work-orders", Some(body), Some(42))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error_body(&unknown, "Unauthorized");

    // Reads are open
    let (status, _) = app.get("/api/work-orders").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn current_user_reflects_the_session_header() {
    let app = TestApp::new().await;

    let (status, user) = app
        .request(Method::GET, "/api/current-user", None, Some(OPERATOR))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "john.cooper");
    assert_eq!(user["role"], "operator");

    let (status, _) = app.get("/api/current-user").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_work_order_fields_are_reported() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/work-orders",
            json!({
                "productId": MOISTURIZER,
                "batchSize": 0,
                "assignedOperatorId": OPERATOR,
                "startDate": "2024-06-01T08:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, "Bad Request");
    assert_eq!(body["details"][0]["field"], "batchSize");

    let (status, body) = app
        .post(
            "/api/work-orders",
            json!({
                "productId": MOISTURIZER,
                "batchSize": 10,
                "assignedOperatorId": OPERATOR,
                "startDate": "2024-06-10",
                "endDate": "2024-06-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "endDate");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/work-orders",
            json!({ "productId": "one", "batchSize": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, "Bad Request");

    let work_order = app.create_work_order(10).await;
    let (status, body) = app
        .patch(
            &format!("/api/work-orders/{}", id_of(&work_order)),
            json!({ "status": "exploded" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, "Bad Request");

    // Immutable fields are not silently ignored
    let (status, _) = app
        .patch(
            &format!("/api/work-orders/{}", id_of(&work_order)),
            json!({ "batchSize": 999 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/quality-reviews",
            json!({ "batchRecordId": 1, "decision": "maybe" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_percentage_is_rejected() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(10).await;
    let record = app.create_batch_record(id_of(&work_order)).await;

    let (status, body) = app
        .patch(
            &format!("/api/batch-records/{}", id_of(&record)),
            json!({ "completionPercentage": 101 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "completionPercentage");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/api/work-orders/404",
        "/api/batch-records/404",
        "/api/users/404",
        "/api/batch-records/404/quality-review",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_error_body(&body, "Not Found");
    }

    let (status, _) = app
        .patch("/api/manufacturing-steps/404", json!({ "completedAt": "2024-06-01" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            "/api/work-orders",
            json!({
                "productId": 404,
                "batchSize": 10,
                "assignedOperatorId": OPERATOR,
                "startDate": "2024-06-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_ids_are_bad_requests() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/work-orders/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, "Bad Request");
}

#[tokio::test]
async fn malformed_query_strings_are_bad_requests() {
    let app = TestApp::new().await;

    for uri in [
        "/api/work-orders?includeRelations=yes",
        "/api/batch-records?includeRelations=1",
        "/api/quality-reviews?pending=soon",
        "/api/activity-logs/recent?limit=-1",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_error_body(&body, "Bad Request");
    }
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/work-orders/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["request_id"].is_string(), "{body}");
}

#[tokio::test]
async fn health_and_status_report_up() {
    let app = TestApp::new().await;

    let (status, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "healthy");

    let (status, api_status) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(api_status["status"], "ok");
    assert_eq!(api_status["environment"], "test");
}

#[tokio::test]
async fn reference_data_is_listed() {
    let app = TestApp::new().await;

    let (_, users) = app.get("/api/users").await;
    assert_eq!(users.as_array().map(Vec::len), Some(app.reference.users.len()));

    let (_, products) = app.get("/api/products").await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), app.reference.products.len());
    assert_eq!(products[0]["name"], "Hydrating Moisturizer");
}
