//! Reference data: authors, genres and publishing houses.
//!
//! These only support list, get and create; books are the sole aggregate
//! with update and delete.

use crate::domain::{
    Author, DomainError, Genre, LookupFilter, NewAuthor, NewGenre, NewPublishingHouse,
    PublishingHouse, Store,
};
use crate::services::book_service::require_name;

pub async fn list_authors(
    store: &dyn Store,
    name: Option<String>,
) -> Result<Vec<Author>, DomainError> {
    let uow = store.begin().await?;
    uow.authors().find(LookupFilter::by_name(name)).await
}

pub async fn get_author(store: &dyn Store, id: i32) -> Result<Author, DomainError> {
    let uow = store.begin().await?;
    uow.authors()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Author {}", id)))
}

pub async fn create_author(store: &dyn Store, input: NewAuthor) -> Result<Author, DomainError> {
    require_name(&input.first_name, "First name")?;
    require_name(&input.last_name, "Last name")?;

    let uow = store.begin().await?;
    let author = uow
        .authors()
        .add(NewAuthor {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
        })
        .await?;
    uow.commit().await?;

    tracing::info!("Created author {} ({})", author.id, author.full_name());
    Ok(author)
}

pub async fn list_genres(
    store: &dyn Store,
    name: Option<String>,
) -> Result<Vec<Genre>, DomainError> {
    let uow = store.begin().await?;
    uow.genres().find(LookupFilter::by_name(name)).await
}

pub async fn get_genre(store: &dyn Store, id: i32) -> Result<Genre, DomainError> {
    let uow = store.begin().await?;
    uow.genres()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Genre {}", id)))
}

pub async fn create_genre(store: &dyn Store, input: NewGenre) -> Result<Genre, DomainError> {
    require_name(&input.name, "Genre name")?;

    let uow = store.begin().await?;
    let genre = uow
        .genres()
        .add(NewGenre {
            name: input.name.trim().to_string(),
        })
        .await?;
    uow.commit().await?;

    tracing::info!("Created genre {} ({})", genre.id, genre.name);
    Ok(genre)
}

pub async fn list_publishing_houses(
    store: &dyn Store,
    name: Option<String>,
) -> Result<Vec<PublishingHouse>, DomainError> {
    let uow = store.begin().await?;
    uow.publishing_houses()
        .find(LookupFilter::by_name(name))
        .await
}

pub async fn get_publishing_house(
    store: &dyn Store,
    id: i32,
) -> Result<PublishingHouse, DomainError> {
    let uow = store.begin().await?;
    uow.publishing_houses()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Publishing house {}", id)))
}

pub async fn create_publishing_house(
    store: &dyn Store,
    input: NewPublishingHouse,
) -> Result<PublishingHouse, DomainError> {
    require_name(&input.name, "Publishing house name")?;

    let uow = store.begin().await?;
    let house = uow
        .publishing_houses()
        .add(NewPublishingHouse {
            name: input.name.trim().to_string(),
            country: input.country.trim().to_string(),
            city: input.city.trim().to_string(),
        })
        .await?;
    uow.commit().await?;

    tracing::info!("Created publishing house {} ({})", house.id, house.name);
    Ok(house)
}
