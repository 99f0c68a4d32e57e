mod common;

use axum::http::{Method, StatusCode};
use common::{id_of, TestApp, OPERATOR, QC, SECOND_OPERATOR};
use serde_json::json;

#[tokio::test]
async fn second_batch_record_for_a_work_order_conflicts() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    app.create_batch_record(id_of(&work_order)).await;

    let (status, body) = app
        .post(
            "/api/batch-records",
            json!({ "workOrderId": id_of(&work_order) }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains(work_order["workOrderNumber"].as_str().unwrap()));
}

#[tokio::test]
async fn batch_record_for_missing_work_order_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/batch-records", json!({ "workOrderId": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn custom_steps_and_tests_replace_the_defaults() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(50).await;

    let (status, record) = app
        .post(
            "/api/batch-records",
            json!({
                "workOrderId": id_of(&work_order),
                "operatorId": SECOND_OPERATOR,
                "manufacturingSteps": [
                    { "name": "Blend", "sortOrder": 2 },
                    { "name": "Weigh", "description": "Tare first", "sortOrder": 1 }
                ],
                "qualityControlTests": [
                    { "name": "pH", "acceptableRange": "6.5 - 7.5" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{record}");
    assert_eq!(record["operatorId"], SECOND_OPERATOR);

    let (_, steps) = app
        .get(&format!("/api/batch-records/{}/manufacturing-steps", id_of(&record)))
        .await;
    let names: Vec<&str> = steps
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Weigh", "Blend"]);

    let (_, tests) = app
        .get(&format!("/api/batch-records/{}/quality-control-tests", id_of(&record)))
        .await;
    assert_eq!(tests.as_array().map(Vec::len), Some(1));
    assert_eq!(tests[0]["acceptableRange"], "6.5 - 7.5");
    assert!(tests[0]["isPassed"].is_null());
}

#[tokio::test]
async fn batch_record_embeds_children_with_relations() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let record = app.create_batch_record(id_of(&work_order)).await;

    let (status, full) = app
        .get(&format!(
            "/api/batch-records/{}?includeRelations=true",
            id_of(&record)
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["workOrder"]["id"], work_order["id"]);
    assert_eq!(full["operator"]["id"], OPERATOR);
    assert_eq!(full["manufacturingSteps"].as_array().map(Vec::len), Some(6));
    assert_eq!(full["qualityControlTests"].as_array().map(Vec::len), Some(4));
    assert!(full["qualityReview"].is_null());

    let (status, by_work_order) = app
        .get(&format!("/api/work-orders/{}/batch-record", id_of(&work_order)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_work_order["id"], record["id"]);

    let (status, _) = app
        .get(&format!("/api/batch-records/{}/quality-review", id_of(&record)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn work_order_without_batch_record_is_not_found() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let (status, _) = app
        .get(&format!("/api/work-orders/{}/batch-record", id_of(&work_order)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn step_completion_drives_the_percentage() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let record = app.create_batch_record(id_of(&work_order)).await;
    let record_uri = format!("/api/batch-records/{}", id_of(&record));

    let (_, steps) = app
        .get(&format!("{}/manufacturing-steps", record_uri))
        .await;
    let first = steps[0].clone();

    let (status, step) = app
        .patch(
            &format!("/api/manufacturing-steps/{}", id_of(&first)),
            json!({ "completedAt": "2024-06-01", "completedBy": SECOND_OPERATOR }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{step}");
    assert_eq!(step["completedBy"], SECOND_OPERATOR);
    assert!(step["completedAt"].as_str().unwrap().starts_with("2024-06-01"));

    // 1 of 6, floored
    let (_, current) = app.get(&record_uri).await;
    assert_eq!(current["completionPercentage"], 16);

    // A seventh step lowers the share
    let (status, _) = app
        .post(
            "/api/manufacturing-steps",
            json!({ "batchRecordId": id_of(&record), "name": "Labelling", "sortOrder": 7 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, current) = app.get(&record_uri).await;
    assert_eq!(current["completionPercentage"], 14);
}

#[tokio::test]
async fn manual_percentage_and_reopening() {
    let app = TestApp::new().await;
    let (_, record) = app.submitted_batch().await;
    let uri = format!("/api/batch-records/{}", id_of(&record));
    assert_eq!(record["completionPercentage"], 100);

    // Completed records stay at 100 regardless of the requested value
    let (_, current) = app
        .patch(&uri, json!({ "completionPercentage": 40 }))
        .await;
    assert_eq!(current["completionPercentage"], 100);

    // Reopening recomputes from steps; none are complete
    let (status, reopened) = app.patch(&uri, json!({ "isComplete": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reopened["isComplete"], false);
    assert_eq!(reopened["completionPercentage"], 0);
    assert_eq!(reopened["submittedAt"], record["submittedAt"]);

    let (_, manual) = app
        .patch(&uri, json!({ "completionPercentage": 40 }))
        .await;
    assert_eq!(manual["completionPercentage"], 40);
}

#[tokio::test]
async fn quality_test_verdict_is_tri_state() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let record = app.create_batch_record(id_of(&work_order)).await;
    let (_, tests) = app
        .get(&format!("/api/batch-records/{}/quality-control-tests", id_of(&record)))
        .await;
    let uri = format!("/api/quality-control-tests/{}", id_of(&tests[1]));

    let (_, failed) = app
        .request(
            Method::PATCH,
            &uri,
            Some(json!({ "result": "25,000 cP", "isPassed": false, "completedAt": "2024-06-02T09:00:00Z" })),
            Some(QC),
        )
        .await;
    assert_eq!(failed["isPassed"], false);
    assert_eq!(failed["result"], "25,000 cP");

    let (_, cleared) = app
        .request(Method::PATCH, &uri, Some(json!({ "isPassed": null })), Some(QC))
        .await;
    assert!(cleared["isPassed"].is_null());
    assert_eq!(cleared["result"], "25,000 cP");

    // Only the first completion is logged
    let (_, activity) = app.get("/api/activity-logs/recent?limit=50").await;
    let completions = activity
        .as_array()
        .unwrap()
        .iter()
        .filter(|entry| entry["activityType"] == "quality_test_completed")
        .count();
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn extra_quality_test_can_be_added() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let record = app.create_batch_record(id_of(&work_order)).await;

    let (status, test) = app
        .post(
            "/api/quality-control-tests",
            json!({
                "batchRecordId": id_of(&record),
                "name": "Fragrance",
                "acceptableRange": "Matches standard"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{test}");
    assert_eq!(test["name"], "Fragrance");
    assert!(test["completedAt"].is_null());
}

#[tokio::test]
async fn a_batch_record_is_reviewed_once() {
    let app = TestApp::new().await;
    let (_, record) = app.submitted_batch().await;
    let body = json!({ "batchRecordId": id_of(&record), "decision": "approve" });

    let (status, _) = app
        .request(Method::POST, "/api/quality-reviews", Some(body.clone()), Some(QC))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, conflict) = app
        .request(Method::POST, "/api/quality-reviews", Some(body), Some(QC))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["error"], "Conflict");

    let (status, review) = app
        .get(&format!("/api/batch-records/{}/quality-review", id_of(&record)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["decision"], "approve");

    let (_, reviews) = app.get("/api/quality-reviews?includeRelations=true").await;
    let reviews = reviews.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["reviewer"]["username"], "sara.williams");
    assert_eq!(reviews[0]["batchRecord"]["id"], record["id"]);
}

#[tokio::test]
async fn completing_a_step_again_is_accepted_and_logged_again() {
    let app = TestApp::new().await;
    let work_order = app.create_work_order(500).await;
    let record = app.create_batch_record(id_of(&work_order)).await;
    let (_, steps) = app
        .get(&format!("/api/batch-records/{}/manufacturing-steps", id_of(&record)))
        .await;
    let step_id = id_of(&steps[0]);
    let uri = format!("/api/manufacturing-steps/{}", step_id);

    for completed_at in ["2024-06-01T10:00:00Z", "2024-06-01T12:00:00Z"] {
        let (status, step) = app.patch(&uri, json!({ "completedAt": completed_at })).await;
        assert_eq!(status, StatusCode::OK, "{step}");
    }

    let (_, current) = app
        .get(&format!("/api/batch-records/{}", id_of(&record)))
        .await;
    assert_eq!(current["completionPercentage"], 16);

    let (_, activity) = app.get("/api/activity-logs/recent?limit=50").await;
    let completions = activity
        .as_array()
        .unwrap()
        .iter()
        .filter(|entry| {
            entry["activityType"] == "manufacturing_step_completed" && entry["entityId"] == step_id
        })
        .count();
    assert_eq!(completions, 2);
}
