//! Book Service - Pure business logic without HTTP layer
//!
//! Every operation works against the [`Store`] abstraction, so the HTTP
//! handlers and the tests can drive it over any backing store.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::domain::{
    Book, BookDetails, BookFilter, DomainError, LookupFilter, MAX_ROW_OFFSET,
    NewPublishingHouse, PublishingHouse, Store, UnitOfWork, distinct_ids,
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Pages past this offset cannot be expressed to the store
pub const MAX_PAGE_OFFSET: u64 = MAX_ROW_OFFSET;

/// Listing parameters as received from the caller
#[derive(Debug, Default, Clone)]
pub struct ListBooksInput {
    pub from_release_date: Option<NaiveDate>,
    pub to_release_date: Option<NaiveDate>,
    /// 1-based, defaults to 1
    pub page: Option<u64>,
    /// Defaults to [`DEFAULT_PAGE_SIZE`]
    pub page_size: Option<u64>,
}

impl ListBooksInput {
    fn to_filter(&self) -> Result<BookFilter, DomainError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(DomainError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(DomainError::validation(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let offset = (page - 1)
            .checked_mul(page_size)
            .filter(|offset| *offset <= MAX_PAGE_OFFSET)
            .ok_or_else(|| DomainError::validation("page is out of range"))?;

        Ok(BookFilter {
            from_release_date: self.from_release_date,
            to_release_date: self.to_release_date,
            offset: Some(offset),
            limit: Some(page_size),
        })
    }
}

/// Publishing house given inline on creation: an existing id to reuse, or
/// the details of a new one
#[derive(Debug, Default, Clone)]
pub struct PublishingHouseInput {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
}

/// Input for creating a book
#[derive(Debug, Clone)]
pub struct CreateBookInput {
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house: PublishingHouseInput,
    pub author_ids: Vec<i32>,
    pub genre_ids: Vec<i32>,
}

/// Input for replacing a book
#[derive(Debug, Clone)]
pub struct UpdateBookInput {
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house_id: i32,
    pub author_ids: Vec<i32>,
    pub genre_ids: Vec<i32>,
}

/// List books, newest release first
pub async fn list_books(
    store: &dyn Store,
    input: ListBooksInput,
) -> Result<Vec<BookDetails>, DomainError> {
    let filter = input.to_filter()?;

    tracing::info!(
        "List books - from={:?}, to={:?}, offset={:?}, limit={:?}",
        filter.from_release_date,
        filter.to_release_date,
        filter.offset,
        filter.limit
    );

    let uow = store.begin().await?;
    let books = uow.books().find(filter).await?;

    tracing::info!("Returning {} books", books.len());
    Ok(books)
}

/// Get a single book by ID
pub async fn get_book(store: &dyn Store, id: i32) -> Result<BookDetails, DomainError> {
    let uow = store.begin().await?;
    uow.books()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Book {}", id)))
}

/// Create a new book.
///
/// A publishing house created along the way is committed on its own, before
/// the authors and genres are checked, so it survives a later failure.
pub async fn create_book(
    store: &dyn Store,
    input: CreateBookInput,
) -> Result<BookDetails, DomainError> {
    require_links(&input.author_ids, &input.genre_ids)?;
    require_name(&input.name, "Book name")?;

    let house = resolve_publishing_house(store, &input.publishing_house).await?;

    let uow = store.begin().await?;
    ensure_references(&*uow, &input.author_ids, &input.genre_ids).await?;

    let book = Book::new(
        input.name,
        input.release_date,
        house.id,
        &input.author_ids,
        &input.genre_ids,
    );
    let book = uow.books().add(book).await?;

    let details = uow.books().find_by_id(book.id).await?.ok_or_else(|| {
        DomainError::Internal(format!("Book {} missing right after insert", book.id))
    })?;

    uow.commit().await?;

    tracing::info!("Created book {} ({})", details.id, details.name);
    Ok(details)
}

/// Replace a book's fields and all of its author/genre links
pub async fn update_book(
    store: &dyn Store,
    id: i32,
    input: UpdateBookInput,
) -> Result<(), DomainError> {
    let uow = store.begin().await?;

    if uow.books().find_by_id(id).await?.is_none() {
        return Err(DomainError::not_found(format!("Book {}", id)));
    }

    require_links(&input.author_ids, &input.genre_ids)?;
    require_name(&input.name, "Book name")?;

    if uow
        .publishing_houses()
        .find_by_id(input.publishing_house_id)
        .await?
        .is_none()
    {
        return Err(DomainError::validation(format!(
            "Publishing house not found: {}",
            input.publishing_house_id
        )));
    }

    ensure_references(&*uow, &input.author_ids, &input.genre_ids).await?;

    let mut book = Book::new(
        input.name,
        input.release_date,
        input.publishing_house_id,
        &input.author_ids,
        &input.genre_ids,
    );
    book.id = id;

    uow.books().update(book).await?;
    uow.commit().await?;

    tracing::info!("Updated book {}", id);
    Ok(())
}

/// Delete a book by ID
pub async fn delete_book(store: &dyn Store, id: i32) -> Result<(), DomainError> {
    let uow = store.begin().await?;
    uow.books().remove(id).await?;
    uow.commit().await?;

    tracing::info!("Deleted book {}", id);
    Ok(())
}

fn require_links(author_ids: &[i32], genre_ids: &[i32]) -> Result<(), DomainError> {
    if author_ids.is_empty() || genre_ids.is_empty() {
        return Err(DomainError::validation(
            "At least one author and one genre are required.",
        ));
    }
    Ok(())
}

pub(crate) fn require_name(value: &str, field: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    Ok(())
}

// Reuse the referenced house when it exists, otherwise create and commit it
async fn resolve_publishing_house(
    store: &dyn Store,
    input: &PublishingHouseInput,
) -> Result<PublishingHouse, DomainError> {
    let uow = store.begin().await?;

    if input.id != 0 {
        if let Some(house) = uow.publishing_houses().find_by_id(input.id).await? {
            return Ok(house);
        }
        tracing::debug!(
            "Publishing house {} not found, creating from details",
            input.id
        );
    }

    require_name(&input.name, "Publishing house name")?;

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

// Every referenced author and genre must exist; all missing ids are reported
async fn ensure_references(
    uow: &dyn UnitOfWork,
    author_ids: &[i32],
    genre_ids: &[i32],
) -> Result<(), DomainError> {
    let author_ids = distinct_ids(author_ids);
    let found: HashSet<i32> = uow
        .authors()
        .find(LookupFilter::by_ids(&author_ids))
        .await?
        .into_iter()
        .map(|a| a.id)
        .collect();
    let missing = missing_ids(&author_ids, &found);
    if !missing.is_empty() {
        return Err(DomainError::validation(format!(
            "Authors not found: {}",
            missing
        )));
    }

    let genre_ids = distinct_ids(genre_ids);
    let found: HashSet<i32> = uow
        .genres()
        .find(LookupFilter::by_ids(&genre_ids))
        .await?
        .into_iter()
        .map(|g| g.id)
        .collect();
    let missing = missing_ids(&genre_ids, &found);
    if !missing.is_empty() {
        return Err(DomainError::validation(format!(
            "Genres not found: {}",
            missing
        )));
    }

    Ok(())
}

/// Comma-separated ids from `requested` that are absent from `found`
fn missing_ids(requested: &[i32], found: &HashSet<i32>) -> String {
    requested
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
