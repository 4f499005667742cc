//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::PrettyJson;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("no matching book in library")]
    NotFound,

    #[error("book already exists library")]
    AlreadyExists,

    #[error("incorrect request parameter")]
    IncorrectParameters,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    Serialization(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to on every route except delete
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound
            | AppError::AlreadyExists
            | AppError::IncorrectParameters
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Render the error with an explicit status, keeping the quoted message body
    pub fn into_response_with(self, status: StatusCode) -> Response {
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, PrettyJson(self.to_string())).into_response()
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.into_response_with(status)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
