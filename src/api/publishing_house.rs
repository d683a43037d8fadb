use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::{CreatePublishingHouseRequest, NameQuery, PublishingHouseDto};
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[utoipa::path(
    get,
    path = "/api/publishing-houses",
    params(NameQuery),
    responses((status = 200, body = [PublishingHouseDto]))
)]
pub async fn list_publishing_houses(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<PublishingHouseDto>>, DomainError> {
    let houses =
        catalog_service::list_publishing_houses(state.store.as_ref(), query.name).await?;
    Ok(Json(houses.into_iter().map(PublishingHouseDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/publishing-houses/{id}",
    params(("id" = i32, Path, description = "Publishing house id")),
    responses(
        (status = 200, body = PublishingHouseDto),
        (status = 404, description = "Publishing house not found")
    )
)]
pub async fn get_publishing_house(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PublishingHouseDto>, DomainError> {
    let house = catalog_service::get_publishing_house(state.store.as_ref(), id).await?;
    Ok(Json(house.into()))
}

#[utoipa::path(
    post,
    path = "/api/publishing-houses",
    request_body = CreatePublishingHouseRequest,
    responses(
        (status = 201, body = PublishingHouseDto),
        (status = 400, description = "Missing name")
    )
)]
pub async fn create_publishing_house(
    State(state): State<AppState>,
    Json(payload): Json<CreatePublishingHouseRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let house =
        catalog_service::create_publishing_house(state.store.as_ref(), payload.into()).await?;
    let location = format!("/api/publishing-houses/{}", house.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PublishingHouseDto::from(house)),
    ))
}
