//! API handlers for the library REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Base path of the library routes
pub const BASE_PATH: &str = "/api/library";

const APPLICATION_JSON: &str = "application/json";

/// Pretty-printed JSON body with `Content-Type: application/json`
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(bytes) => ([(CONTENT_TYPE, APPLICATION_JSON)], bytes).into_response(),
            Err(e) => AppError::Internal(format!("cannot encode response: {}", e)).into_response(),
        }
    }
}

/// 200 with an empty JSON-typed body, returned by mutating routes
pub struct Empty;

impl IntoResponse for Empty {
    fn into_response(self) -> Response {
        (StatusCode::OK, [(CONTENT_TYPE, APPLICATION_JSON)]).into_response()
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let library = Router::new()
        .route("/getlist", get(books::list_books))
        .route("/get/:name/:author", get(books::get_book))
        .route("/create", put(books::create_book))
        .route("/update", put(books::update_book))
        .route("/delete/:name/:author", delete(books::delete_book))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health_check))
        .nest(BASE_PATH, library)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
