use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::author::list_authors,
        api::author::get_author,
        api::author::create_author,
        api::genre::list_genres,
        api::genre::get_genre,
        api::genre::create_genre,
        api::publishing_house::list_publishing_houses,
        api::publishing_house::get_publishing_house,
        api::publishing_house::create_publishing_house,
    ),
    components(
        schemas(
            api::dto::BookResponse,
            api::dto::BookCreateRequest,
            api::dto::BookUpdateRequest,
            api::dto::PublishingHouseDto,
            api::dto::AuthorDto,
            api::dto::CreateAuthorRequest,
            api::dto::GenreDto,
            api::dto::CreateGenreRequest,
            api::dto::CreatePublishingHouseRequest,
        )
    ),
    tags(
        (name = "books-catalog", description = "Books catalog API")
    )
)]
pub struct ApiDoc;
