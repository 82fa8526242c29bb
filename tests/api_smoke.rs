use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use blume_admin_mock::{
    config::{DatasetConfig, DatasetSizes, MockSettings},
    mock_client::MockApiClient,
    routes::{router, AppState},
    services::InMemoryService,
};

fn app_with(settings: MockSettings) -> Router {
    let service = InMemoryService::from_config(&DatasetConfig {
        sizes: DatasetSizes::small(),
        seed: Some(2024),
    });
    router(AppState::new(MockApiClient::new(service, settings)))
}

fn app() -> Router {
    app_with(MockSettings::instant())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_mock_settings() {
    let (status, body) = call(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "ok");
    assert_eq!(body["mock"]["delay_ms"], 0);
}

#[tokio::test]
async fn lists_users_with_pagination_and_filters() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/v1/users?page=2&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total"], 20);
    assert_eq!(body["total_pages"], 4);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert!(body["data"][0].get("password").is_none());

    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/users?status=active&status=banned&limit=100",
        None,
    )
    .await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["status"] == "active" || u["status"] == "banned"));
}

#[tokio::test]
async fn bad_page_is_a_bad_request() {
    let (status, body) = call(&app(), Method::GET, "/api/v1/plans?page=first", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (status, body) = call(&app(), Method::GET, "/api/v1/users/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn simulated_failures_surface_as_503() {
    let app = app_with(MockSettings {
        delay: std::time::Duration::ZERO,
        error_rate: 1.0,
    });
    let (status, body) = call(&app, Method::GET, "/api/v1/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Simulated API error - please try again");
}

#[tokio::test]
async fn create_then_adjust_wallet() {
    let app = app();
    let (status, user) = call(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(json!({"username": "route.tester", "email": "route.tester@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = user["id"].as_str().unwrap().to_string();

    let (status, outcome) = call(
        &app,
        Method::POST,
        &format!("/api/v1/users/{id}/wallet"),
        Some(json!({"amount": 750, "reason": "welcome bonus"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["new_balance"], 750);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/v1/users/{id}/wallet"),
        Some(json!({"amount": -1000})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, logs) = call(&app, Method::GET, "/api/v1/action-logs", None).await;
    assert_eq!(logs[0]["action"], "adjust_wallet");
    assert_eq!(logs[1]["action"], "create_user");
}

#[tokio::test]
async fn overflowing_wallet_credit_is_rejected() {
    let app = app();
    let (_, page) = call(&app, Method::GET, "/api/v1/users?limit=1", None).await;
    let id = page["data"][0]["id"].as_str().unwrap().to_string();
    let wallet = format!("/api/v1/users/{id}/wallet");

    call(&app, Method::POST, &wallet, Some(json!({"amount": 1}))).await;
    let (status, body) = call(
        &app,
        Method::POST,
        &wallet,
        Some(json!({"amount": i64::MAX, "reason": "overflow"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = call(&app, Method::GET, &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn moderation_endpoints() {
    let app = app();
    let (_, reviews) = call(&app, Method::GET, "/api/v1/reviews?limit=1", None).await;
    let review_id = reviews["data"][0]["id"].as_str().unwrap().to_string();
    let (status, outcome) = call(
        &app,
        Method::POST,
        &format!("/api/v1/reviews/{review_id}/moderate"),
        Some(json!({"action": "flag"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["data"]["status"], "flagged");

    let (_, queue) = call(&app, Method::GET, "/api/v1/verifications?limit=1", None).await;
    let verification_id = queue["data"][0]["id"].as_str().unwrap().to_string();
    let (status, outcome) = call(
        &app,
        Method::POST,
        &format!("/api/v1/verifications/{verification_id}/reject"),
        Some(json!({"reason": "document expired"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["message"], "Verification rejected successfully");
    assert_eq!(outcome["data"]["rejection_reason"], "document expired");
}

#[tokio::test]
async fn config_section_round_trip() {
    let app = app();
    let (status, outcome) = call(
        &app,
        Method::PUT,
        "/api/v1/config/beens_points",
        Some(json!({"service_fee_percent": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["data"]["beens_points"]["service_fee_percent"], 12);

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/config/unknown",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, reset) = call(&app, Method::POST, "/api/v1/config/reset", None).await;
    assert_eq!(reset["data"]["beens_points"]["service_fee_percent"], 10);
}

#[tokio::test]
async fn options_and_analytics() {
    let app = app();
    let (_, options) = call(&app, Method::GET, "/api/v1/options", None).await;
    assert_eq!(options["plan_types"][0]["value"], 1);
    assert_eq!(options["subscriptions"][2]["label"], "Black");

    let (status, analytics) = call(&app, Method::GET, "/api/v1/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["user_growth"].as_array().unwrap().len(), 12);
    assert_eq!(analytics["plan_distribution"][1]["color"], "#1890ff");
}
