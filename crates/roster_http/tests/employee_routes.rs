use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use roster_core::db::open_db_in_memory;
use roster_http::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(open_db_in_memory().unwrap()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn scarlett() -> Value {
    json!({
        "firstName": "Scarlett",
        "lastName": "Johansson",
        "email": "scarjo@email.com"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, bytes) = send(app, Method::POST, "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_creates_employee_with_id() {
    let app = app();

    let created = create(&app, scarlett()).await;

    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["firstName"], "Scarlett");
    assert_eq!(created["lastName"], "Johansson");
    assert_eq!(created["email"], "scarjo@email.com");
}

#[tokio::test]
async fn post_ignores_client_supplied_id() {
    let app = app();

    let mut body = scarlett();
    body["id"] = json!(500);
    let created = create(&app, body).await;

    assert_ne!(created["id"], json!(500));
}

#[tokio::test]
async fn post_duplicate_email_is_conflict() {
    let app = app();
    create(&app, scarlett()).await;

    let (status, bytes) = send(&app, Method::POST, "/employees", Some(scarlett())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].as_str().unwrap().contains("scarjo@email.com"));
}

#[tokio::test]
async fn post_accepts_free_form_fields() {
    let app = app();

    let created = create(
        &app,
        json!({"firstName": "Prince", "lastName": "", "email": "prince"}),
    )
    .await;

    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["lastName"], "");
    assert_eq!(created["email"], "prince");
}

#[tokio::test]
async fn get_lists_all_employees() {
    let app = app();
    create(&app, scarlett()).await;
    create(
        &app,
        json!({"firstName": "Robert", "lastName": "Downey Jr", "email": "tonystark@email.com"}),
    )
    .await;

    let (status, bytes) = send(&app, Method::GET, "/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_by_id_returns_employee() {
    let app = app();
    let created = create(&app, scarlett()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, bytes) = send(&app, Method::GET, &format!("/employees/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, created);
}

#[tokio::test]
async fn get_unknown_id_is_not_found_with_empty_body() {
    let app = app();

    let (status, bytes) = send(&app, Method::GET, "/employees/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn put_updates_last_name_and_keeps_id() {
    let app = app();
    let created = create(&app, scarlett()).await;
    let id = created["id"].as_i64().unwrap();

    let patch = json!({
        "firstName": "Scarlett",
        "lastName": "Romanoff",
        "email": "scarjo@email.com"
    });
    let uri = format!("/employees/{id}");
    let (status, bytes) = send(&app, Method::PUT, &uri, Some(patch)).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["lastName"], "Romanoff");
}

#[tokio::test]
async fn put_to_taken_email_is_conflict() {
    let app = app();
    create(&app, scarlett()).await;
    let ana = create(
        &app,
        json!({"firstName": "Ana", "lastName": "De Armas", "email": "anadearmas@email.com"}),
    )
    .await;
    let uri = format!("/employees/{}", ana["id"]);

    let patch = json!({"firstName": "Ana", "lastName": "De Armas", "email": "scarjo@email.com"});
    let (status, bytes) = send(&app, Method::PUT, &uri, Some(patch)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "E0004");

    let (status, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let stored: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored, ana);
}

#[tokio::test]
async fn put_unknown_id_is_not_found() {
    let app = app();

    let (status, _) = send(&app, Method::PUT, "/employees/42", Some(scarlett())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_confirms_and_removes_employee() {
    let app = app();
    let created = create(&app, scarlett()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, bytes) = send(&app, Method::DELETE, &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        format!("Employee with id {id} deleted successfully")
    );

    let (status, _) = send(&app, Method::GET, &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_still_succeeds() {
    let app = app();

    let (status, _) = send(&app, Method::DELETE, "/employees/9", None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_answers_pong_with_request_id() {
    let app = app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-1");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"pong");
}
