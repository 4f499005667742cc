//! API integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{
    api::create_router, models::BookIdentifier, repository::MemoryBookStore, services::Services,
    AppState,
};

const BASE_URL: &str = "/api/library";

/// Router backed by a fresh in-memory store
fn app() -> Router {
    let store = Arc::new(MemoryBookStore::new());
    create_router(AppState {
        services: Arc::new(Services::new(store)),
    })
}

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> TestResponse {
    let body = body.map(|v| Body::from(v.to_string())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(format!("{}{}", BASE_URL, path))
        .body(body)
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}

fn book1() -> Value {
    json!({ "name": "book1", "author": "philip", "contents": "A bad read" })
}

async fn seed(app: &Router) {
    for book in [
        book1(),
        json!({ "name": "book2", "author": "Gino", "contents": "A wild read" }),
        json!({ "name": "book3", "author": "Sheldon", "contents": "A bizarre read" }),
    ] {
        let response = send(app, Method::PUT, "/create", Some(book)).await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_create_book() {
    let app = app();

    let response = send(&app, Method::PUT, "/create", Some(book1())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "");
    assert_eq!(response.content_type.as_deref(), Some("application/json"));

    let response = send(&app, Method::PUT, "/create", Some(book1())).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"book already exists library\"");
}

#[tokio::test]
async fn test_create_rejects_incomplete_books() {
    let app = app();

    for book in [
        json!({ "name": "", "author": "author", "contents": "contents" }),
        json!({ "name": "name", "author": "", "contents": "contents" }),
        json!({ "name": "name", "author": "author", "contents": "" }),
        json!({ "name": "name", "author": "author" }),
    ] {
        let response = send(&app, Method::PUT, "/create", Some(book)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, "\"not enough information to store book\"");
    }

    let response = send(&app, Method::GET, "/getlist", None).await;
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    seed(&app).await;

    let updated = json!({ "name": "book1", "author": "philip", "contents": "A good read" });
    let response = send(&app, Method::PUT, "/update", Some(updated)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "");

    let response = send(&app, Method::GET, "/get/book1/philip", None).await;
    let book: Value = serde_json::from_str(&response.body).expect("Failed to parse book");
    assert_eq!(book["contents"], "A good read");

    let fake = json!({ "name": "NameFake", "author": "AuthorFake", "contents": "ContentsFake" });
    let response = send(&app, Method::PUT, "/update", Some(fake)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"no matching book in library\"");
}

#[tokio::test]
async fn test_update_rejects_incomplete_book() {
    let app = app();
    seed(&app).await;

    let response = send(
        &app,
        Method::PUT,
        "/update",
        Some(json!({ "name": "book1", "author": "philip" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, Method::GET, "/get/book1/philip", None).await;
    let book: Value = serde_json::from_str(&response.body).expect("Failed to parse book");
    assert_eq!(book["contents"], "A bad read");
}

#[tokio::test]
async fn test_get_book() {
    let app = app();
    seed(&app).await;

    let response = send(&app, Method::GET, "/get/book2/Gino", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    // Pretty-printed
    assert!(response.body.contains('\n'));

    let book: Value = serde_json::from_str(&response.body).expect("Failed to parse book");
    assert_eq!(book["name"], "book2");
    assert_eq!(book["author"], "Gino");
    assert_eq!(book["contents"], "A wild read");
    assert!(book["updatedDate"].is_string());

    let response = send(&app, Method::GET, "/get/book2/philip", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"no matching book in library\"");
}

#[tokio::test]
async fn test_path_parameters_are_decoded() {
    let app = app();
    let book = json!({ "name": "The Okay Gatsby", "author": "philip", "contents": "Fine" });
    send(&app, Method::PUT, "/create", Some(book)).await;

    let response = send(&app, Method::GET, "/get/The%20Okay%20Gatsby/philip", None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_path_parameters() {
    let app = app();
    seed(&app).await;

    // %FF is not valid UTF-8
    let response = send(&app, Method::GET, "/get/%FF/philip", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"incorrect request parameter\"");

    let response = send(&app, Method::GET, "/get//philip", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"incorrect request parameter\"");
}

#[tokio::test]
async fn test_delete_malformed_path_is_400_not_404() {
    let app = app();
    seed(&app).await;

    let response = send(&app, Method::DELETE, "/delete/%FF/philip", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "\"incorrect request parameter\"");

    let response = send(&app, Method::DELETE, "/delete//philip", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Nothing was removed
    let response = send(&app, Method::GET, "/get/book1/philip", None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    seed(&app).await;

    let response = send(&app, Method::DELETE, "/delete/book3/Sheldon", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "");

    let response = send(&app, Method::DELETE, "/delete/book3/Sheldon", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "\"no matching book in library\"");
}

#[tokio::test]
async fn test_get_books() {
    let app = app();
    seed(&app).await;
    send(&app, Method::DELETE, "/delete/book3/Sheldon", None).await;

    let response = send(&app, Method::GET, "/getlist", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let mut books: Vec<BookIdentifier> =
        serde_json::from_str(&response.body).expect("Failed to parse list");
    books.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(
        books,
        vec![
            BookIdentifier::new("book1", "philip"),
            BookIdentifier::new("book2", "Gino"),
        ]
    );

    // Identifiers only
    let raw: Value = serde_json::from_str(&response.body).expect("Failed to parse list");
    assert!(raw[0].get("contents").is_none());
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}
