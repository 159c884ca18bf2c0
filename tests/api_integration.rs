//! HTTP API integration tests
//!
//! Requests are driven through the full router with `tower::ServiceExt::oneshot`,
//! so middleware, routing and error mapping are exercised without binding a port.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use goods_return_notification_service::config::Settings;
use goods_return_notification_service::directory::InMemoryDirectory;
use goods_return_notification_service::domain::{
    Contractor, ContractorType, Employee, Seller, Status,
};
use goods_return_notification_service::localization::CatalogLocalizer;
use goods_return_notification_service::server::{create_app, AppState};

fn directory() -> Arc<InMemoryDirectory> {
    let directory = InMemoryDirectory::new();
    directory.insert_seller(Seller {
        id: 1,
        name: "Acme Trading".to_string(),
        email_from: Some("returns@acme.test".to_string()),
        permitted_emails: HashMap::from([(
            "tsGoodsReturn".to_string(),
            vec!["warehouse@acme.test".to_string()],
        )]),
    });
    directory.insert_contractor(Contractor {
        id: 1,
        contractor_type: ContractorType::Customer,
        name: "Jane Roe".to_string(),
        email: Some("jane@client.test".to_string()),
        mobile: Some("+15550100".to_string()),
    });
    directory.insert_employee(Employee {
        id: 2,
        first_name: "Ivan".to_string(),
        last_name: "Petrov".to_string(),
    });
    directory.insert_employee(Employee {
        id: 3,
        first_name: "Olga".to_string(),
        last_name: "Smirnova".to_string(),
    });
    directory.insert_status(Status {
        id: 1,
        name: "Pending".to_string(),
    });
    directory.insert_status(Status {
        id: 2,
        name: "Approved".to_string(),
    });
    Arc::new(directory)
}

fn app_with(settings: Settings) -> Router {
    let state =
        AppState::with_components(settings, directory(), Arc::new(CatalogLocalizer::new()));
    create_app(state)
}

fn app() -> Router {
    app_with(Settings::default())
}

fn goods_return_body(notification_type: i64, differences: Value) -> Value {
    json!({
        "data": {
            "resellerId": 1,
            "notificationType": notification_type,
            "clientId": "1",
            "creatorId": 2,
            "expertId": 3,
            "complaintId": 42,
            "complaintNumber": "RC-42",
            "consumptionId": 77,
            "consumptionNumber": "CN-77",
            "agreementNumber": "AG-1",
            "date": "2024-05-01",
            "differences": differences
        }
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["transport"], "outbox");
}

#[tokio::test]
async fn test_goods_return_change_dispatches_all_channels() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(2, json!({"from": 1, "to": 2})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "notificationEmployeeByEmail": true,
            "notificationClientByEmail": true,
            "notificationClientBySms": {"isSent": true, "message": ""}
        })
    );

    let response = app.oneshot(get("/api/v1/outbox")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outbox = json_body(response).await;
    assert_eq!(outbox["total"], 3);
    assert_eq!(outbox["entries"][0]["message"]["channel"], "email");
    assert_eq!(outbox["entries"][0]["message"]["emailTo"], "warehouse@acme.test");
    assert_eq!(outbox["entries"][2]["message"]["channel"], "sms");
    let differences = outbox["entries"][2]["message"]["payload"]["DIFFERENCES"]
        .as_str()
        .unwrap_or_default();
    assert!(differences.contains("Approved"));
}

#[tokio::test]
async fn test_goods_return_new_reaches_only_employees() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(1, json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["notificationEmployeeByEmail"], true);
    assert_eq!(body["notificationClientByEmail"], false);
    assert_eq!(body["notificationClientBySms"]["isSent"], false);
}

#[tokio::test]
async fn test_invalid_request_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &json!({"data": {"notificationType": 1}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert_eq!(body["error"]["message"], "Empty resellerId");
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/operations/goods-return")
        .header("content-type", "application/json")
        .body(Body::from("{\"data\": {"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_BODY");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/operations/goods-return")
        .body(Body::from("{}"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_missing_data_section_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &json!({"payload": {"resellerId": 1}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_creator_is_reported() {
    let mut body = goods_return_body(1, json!({}));
    body["data"]["creatorId"] = json!(99);

    let response = app()
        .oneshot(post_json("/api/v1/operations/goods-return", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "ENTITY_NOT_FOUND");
    assert_eq!(body["error"]["message"], "Creator not found!");
}

#[tokio::test]
async fn test_empty_template_field_is_server_error() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(2, json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "EMPTY_TEMPLATE_FIELD");
}

#[tokio::test]
async fn test_stats_reflect_operations() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(1, json!({})),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json("/api/v1/operations/goods-return", &json!({"data": {}})))
        .await
        .unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["operations"]["total"], 2);
    assert_eq!(body["operations"]["completed"], 1);
    assert_eq!(body["operations"]["rejected"], 1);
    assert_eq!(body["directory"]["employees"], 2);
    assert_eq!(body["outbox"]["emails_recorded"], 1);
}

#[tokio::test]
async fn test_outbox_can_be_cleared() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(1, json!({})),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/outbox")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/v1/outbox")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_outbox_not_found_with_noop_transport() {
    let mut settings = Settings::default();
    settings.notification.transport = "noop".to_string();

    let app = app_with(settings);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(2, json!({"from": 1, "to": 2})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/v1/outbox")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = app();

    app.clone()
        .oneshot(post_json(
            "/api/v1/operations/goods-return",
            &goods_return_body(1, json!({})),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("goods_return_operations_total"));
}
