//! Integration tests for medication endpoints

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::error_code;
use serde_json::{json, Value};

fn aspirin() -> Value {
    json!({ "name": "Aspirin", "dosage": "100mg", "frequency": "daily" })
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

#[tokio::test]
async fn test_daily_flow_reaches_full_adherence() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let (status, created) = app.post_auth("/api/medications", &token, &aspirin()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["user_id"], 1);
    assert_eq!(created["times"], 1);
    assert_eq!(created["notes"], "");

    let (status, marked) = app
        .post_auth("/api/medications/1/taken", &token, &json!({ "date": now() }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["message"], "Medication marked as taken");
    assert_eq!(marked["logId"], 1);

    let (status, stats) = app.get_auth("/api/medications/adherence", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "overall": 100, "taken": 1, "total": 1 }));
}

#[tokio::test]
async fn test_adherence_without_medications() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let (status, stats) = app.get_auth("/api/medications/adherence", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "overall": 0, "taken": 0, "total": 0 }));
}

#[tokio::test]
async fn test_adherence_partial_and_repeat_doses() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let first = app.create_medication(&token, &aspirin()).await;
    let metformin = json!({
        "name": "Metformin",
        "dosage": "500mg",
        "frequency": "twice daily",
        "times": 2
    });
    let vitamin_d = json!({ "name": "Vitamin D", "dosage": "1000IU", "frequency": "daily" });
    app.create_medication(&token, &metformin).await;
    app.create_medication(&token, &vitamin_d).await;

    let path = format!("/api/medications/{}/taken", first);
    app.post_auth(&path, &token, &json!({ "date": now() })).await;

    let (_, stats) = app.get_auth("/api/medications/adherence", &token).await;
    assert_eq!(stats, json!({ "overall": 33, "taken": 1, "total": 3 }));

    // A second dose of the same medication counts again
    app.post_auth(&path, &token, &json!({ "date": now() })).await;
    let (_, stats) = app.get_auth("/api/medications/adherence", &token).await;
    assert_eq!(stats, json!({ "overall": 67, "taken": 2, "total": 3 }));
}

#[tokio::test]
async fn test_backdated_dose_is_logged_but_not_counted_today() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;
    let id = app.create_medication(&token, &aspirin()).await;

    let (status, marked) = app
        .post_auth(
            &format!("/api/medications/{}/taken", id),
            &token,
            &json!({ "date": "2020-01-15", "notes": "late entry" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["logId"], 1);

    let (_, stats) = app.get_auth("/api/medications/adherence", &token).await;
    assert_eq!(stats, json!({ "overall": 0, "taken": 0, "total": 1 }));
}

#[tokio::test]
async fn test_list_is_newest_first_and_scoped() {
    let app = common::TestApp::new().await;
    let ann = app.register_user("Ann", "ann@x.com", "pw").await;
    let bob = app.register_user("Bob", "bob@x.com", "pw").await;

    app.create_medication(&ann, &aspirin()).await;
    let metformin = json!({ "name": "Metformin", "dosage": "500mg", "frequency": "daily" });
    let ibuprofen = json!({ "name": "Ibuprofen", "dosage": "200mg", "frequency": "as needed" });
    app.create_medication(&ann, &metformin).await;
    app.create_medication(&bob, &ibuprofen).await;

    let (status, list) = app.get_auth("/api/medications", &ann).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Metformin", "Aspirin"]);

    let (_, list) = app.get_auth("/api/medications", &bob).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Ibuprofen");
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let (status, response) = app
        .post_auth("/api/medications", &token, &json!({ "name": "Aspirin" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");

    let (_, list) = app.get_auth("/api/medications", &token).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_rejects_non_positive_times() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let mut body = aspirin();
    body["times"] = json!(0);
    let (status, _) = app.post_auth("/api/medications", &token, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;
    let id = app.create_medication(&token, &aspirin()).await;

    let (status, response) = app
        .put_auth(
            &format!("/api/medications/{}", id),
            &token,
            &json!({
                "name": "Aspirin",
                "dosage": "200mg",
                "frequency": "daily",
                "times": 2,
                "notes": "with food"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Medication updated successfully");

    let (_, list) = app.get_auth("/api/medications", &token).await;
    assert_eq!(list[0]["dosage"], "200mg");
    assert_eq!(list[0]["times"], 2);
    assert_eq!(list[0]["notes"], "with food");
}

#[tokio::test]
async fn test_update_missing_fields() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;
    let id = app.create_medication(&token, &aspirin()).await;

    let (status, _) = app
        .put_auth(&format!("/api/medications/{}", id), &token, &json!({ "dosage": "1mg" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_removes_medication() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;
    let id = app.create_medication(&token, &aspirin()).await;
    app.post_auth(&format!("/api/medications/{}/taken", id), &token, &json!({ "date": now() }))
        .await;

    let (status, response) = app
        .delete_auth(&format!("/api/medications/{}", id), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Medication deleted successfully");

    let (_, list) = app.get_auth("/api/medications", &token).await;
    assert_eq!(list, json!([]));

    let (_, stats) = app.get_auth("/api/medications/adherence", &token).await;
    assert_eq!(stats, json!({ "overall": 0, "taken": 0, "total": 0 }));

    let logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medication_logs")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(logs, 0);
}

#[tokio::test]
async fn test_other_users_medication_is_not_found() {
    let app = common::TestApp::new().await;
    let ann = app.register_user("Ann", "ann@x.com", "pw").await;
    let bob = app.register_user("Bob", "bob@x.com", "pw").await;
    let id = app.create_medication(&ann, &aspirin()).await;

    let path = format!("/api/medications/{}", id);

    let (status, response) = app.put_auth(&path, &bob, &aspirin()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["message"], "Medication not found");

    let (status, _) = app.delete_auth(&path, &bob).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_auth(&format!("{}/taken", path), &bob, &json!({ "date": now() }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ann's medication is untouched
    let (_, list) = app.get_auth("/api/medications", &ann).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (_, stats) = app.get_auth("/api/medications/adherence", &ann).await;
    assert_eq!(stats["taken"], 0);
}

#[tokio::test]
async fn test_missing_medication_is_not_found() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let (status, _) = app.put_auth("/api/medications/999", &token, &aspirin()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete_auth("/api/medications/999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_auth("/api/medications/999/taken", &token, &json!({ "date": now() }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_taken_requires_date() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;
    let id = app.create_medication(&token, &aspirin()).await;

    let (status, response) = app
        .post_auth(&format!("/api/medications/{}/taken", id), &token, &json!({}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = common::TestApp::new().await;
    let token = app.register_user("Ann", "ann@x.com", "pw").await;

    let (status, response) = app.delete_auth("/api/medications/abc", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["message"], "Invalid medication ID");
}

#[tokio::test]
async fn test_every_medication_route_requires_token() {
    let app = common::TestApp::new().await;

    for (method, path) in [
        ("GET", "/api/medications"),
        ("POST", "/api/medications"),
        ("PUT", "/api/medications/1"),
        ("DELETE", "/api/medications/1"),
        ("POST", "/api/medications/1/taken"),
        ("GET", "/api/medications/adherence"),
    ] {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from(aspirin().to_string()))
            .unwrap();

        let response = tower::ServiceExt::oneshot(app.app.clone(), request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);
    }
}
