use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use folio_http::{
    error::{AppError, ErrorBody},
    extract::JsonOrDefault,
};

use super::models::{Book, CreateBook, UpdateBook};
use super::store::BookStore;

/// Path ids that are not positive integers never match a record.
pub(crate) fn parse_id(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .map_err(|_| AppError::not_found("Book not found."))
}

/// Get all books (public)
#[utoipa::path(
    get,
    path = "/",
    tag = "Books",
    responses(
        (status = 200, description = "List of books", body = [Book])
    )
)]
pub async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list())
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/",
    tag = "Books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Title and author are required, or the body is not valid JSON", body = ErrorBody)
    )
)]
pub async fn create_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<JsonOrDefault<CreateBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let JsonOrDefault(request) = payload?;
    let book = store.create(request)?;
    tracing::debug!(id = book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Books",
    params(("id" = u32, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "A single book", body = Book),
        (status = 404, description = "Book not found", body = ErrorBody)
    )
)]
pub async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(store.read(id)?))
}

/// Update a book by ID
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Books",
    params(("id" = u32, Path, description = "Book identifier")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 404, description = "Book not found", body = ErrorBody)
    )
)]
pub async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
    payload: Result<JsonOrDefault<UpdateBook>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let JsonOrDefault(patch) = payload?;
    let book = store.update(id, patch)?;
    tracing::debug!(id = book.id, "book updated");
    Ok(Json(book))
}

/// Delete a book by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Books",
    params(("id" = u32, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book deleted", body = Book),
        (status = 404, description = "Book not found", body = ErrorBody)
    )
)]
pub async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(&id)?;
    let book = store.delete(id)?;
    tracing::debug!(id = book.id, "book deleted");
    Ok(Json(book))
}
