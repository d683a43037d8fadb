use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::{CreateGenreRequest, GenreDto, NameQuery};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[utoipa::path(
    get,
    path = "/api/genres",
    params(NameQuery),
    responses((status = 200, body = [GenreDto]))
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<GenreDto>>, DomainError> {
    let genres = catalog_service::list_genres(state.store.as_ref(), query.name).await?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses((status = 200, body = GenreDto), (status = 404, description = "Genre not found"))
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GenreDto>, DomainError> {
    let genre = catalog_service::get_genre(state.store.as_ref(), id).await?;
    Ok(Json(genre.into()))
}

#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreRequest,
    responses((status = 201, body = GenreDto), (status = 400, description = "Missing name"))
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<CreateGenreRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let genre = catalog_service::create_genre(state.store.as_ref(), payload.into()).await?;
    let location = format!("/api/genres/{}", genre.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(GenreDto::from(genre)),
    ))
}
