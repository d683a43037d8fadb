use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::{AuthorDto, CreateAuthorRequest, NameQuery};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[utoipa::path(
    get,
    path = "/api/authors",
    params(NameQuery),
    responses((status = 200, body = [AuthorDto]))
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<AuthorDto>>, DomainError> {
    let authors = catalog_service::list_authors(state.store.as_ref(), query.name).await?;
    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses((status = 200, body = AuthorDto), (status = 404, description = "Author not found"))
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AuthorDto>, DomainError> {
    let author = catalog_service::get_author(state.store.as_ref(), id).await?;
    Ok(Json(author.into()))
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = CreateAuthorRequest,
    responses((status = 201, body = AuthorDto), (status = 400, description = "Missing name"))
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthorRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let author = catalog_service::create_author(state.store.as_ref(), payload.into()).await?;
    let location = format!("/api/authors/{}", author.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(AuthorDto::from(author)),
    ))
}
