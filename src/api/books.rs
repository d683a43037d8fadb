//! Book API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::{BookCreateRequest, BookResponse, BookUpdateRequest, ListBooksQuery};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::book_service;

#[utoipa::path(
    get,
    path = "/api/books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Books, newest release first", body = [BookResponse]),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, DomainError> {
    let books = book_service::list_books(state.store.as_ref(), query.into()).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookResponse>, DomainError> {
    let book = book_service::get_book(state.store.as_ref(), id).await?;
    Ok(Json(book.into()))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookCreateRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Missing or unknown authors, genres or publishing house")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookCreateRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let book = book_service::create_book(state.store.as_ref(), payload.into()).await?;
    let location = format!("/api/books/{}", book.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(BookResponse::from(book)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = BookUpdateRequest,
    responses(
        (status = 204, description = "Book replaced"),
        (status = 400, description = "Invalid references"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookUpdateRequest>,
) -> Result<StatusCode, DomainError> {
    book_service::update_book(state.store.as_ref(), id, payload.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, DomainError> {
    book_service::delete_book(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
