//! Book endpoints

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookIdentifier},
    AppState,
};

use super::{Empty, PrettyJson};

type PathParams = Result<Path<HashMap<String, String>>, PathRejection>;

fn identifier_from_path(params: PathParams) -> AppResult<BookIdentifier> {
    let Path(params) = params.map_err(|e| {
        tracing::debug!("Rejected path parameters: {}", e);
        AppError::IncorrectParameters
    })?;
    BookIdentifier::from_params(&params)
}

/// List the name and author of every stored book
#[utoipa::path(
    get,
    path = "/api/library/getlist",
    tag = "library",
    responses(
        (status = 200, description = "Identifiers of all books", body = Vec<BookIdentifier>),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
) -> AppResult<PrettyJson<Vec<BookIdentifier>>> {
    let books = state.services.library.list_books().await?;
    Ok(PrettyJson(books))
}

/// Get a single book
#[utoipa::path(
    get,
    path = "/api/library/get/{name}/{author}",
    tag = "library",
    params(
        ("name" = String, Path, description = "Book name"),
        ("author" = String, Path, description = "Book author")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Incorrect parameters or no matching book", body = String),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    params: PathParams,
) -> AppResult<PrettyJson<Book>> {
    let id = identifier_from_path(params)?;
    let book = state.services.library.get_book(&id).await?;
    Ok(PrettyJson(book))
}

/// Store a new book
#[utoipa::path(
    put,
    path = "/api/library/create",
    tag = "library",
    request_body = Book,
    responses(
        (status = 200, description = "Book stored"),
        (status = 400, description = "Incomplete book or book already exists", body = String),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn create_book(State(state): State<AppState>, body: Bytes) -> AppResult<Empty> {
    let book = Book::from_request_body(&body)?;
    state.services.library.create_book(book).await?;
    Ok(Empty)
}

/// Replace the contents of an existing book
#[utoipa::path(
    put,
    path = "/api/library/update",
    tag = "library",
    request_body = Book,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Incomplete book or no matching book", body = String),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn update_book(State(state): State<AppState>, body: Bytes) -> AppResult<Empty> {
    let book = Book::from_request_body(&body)?;
    state.services.library.update_book(book).await?;
    Ok(Empty)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/library/delete/{name}/{author}",
    tag = "library",
    params(
        ("name" = String, Path, description = "Book name"),
        ("author" = String, Path, description = "Book author")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Incorrect parameters", body = String),
        (status = 404, description = "No matching book", body = String),
        (status = 500, description = "Storage failure", body = String)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    params: PathParams,
) -> Result<Empty, Response> {
    let id = identifier_from_path(params).map_err(IntoResponse::into_response)?;
    match state.services.library.delete_book(&id).await {
        Ok(()) => Ok(Empty),
        // Delete is the one route where a missing book is a 404
        Err(e @ AppError::NotFound) => Err(e.into_response_with(StatusCode::NOT_FOUND)),
        Err(e) => Err(e.into_response()),
    }
}
