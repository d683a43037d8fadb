//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::DomainError;
use super::entities::{Author, Book, BookDetails, Genre, PublishingHouse};

/// Largest row offset or limit the store accepts (SQLite binds them as i64)
pub const MAX_ROW_OFFSET: u64 = i64::MAX as u64;

/// Filter criteria for book queries.
///
/// Results always come back newest release first, ties broken by publishing
/// house name. `offset`/`limit` are applied after ordering.
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    /// Inclusive lower bound on the release date
    pub from_release_date: Option<NaiveDate>,
    /// Inclusive upper bound on the release date
    pub to_release_date: Option<NaiveDate>,
    /// At most [`MAX_ROW_OFFSET`]
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Filter criteria shared by the reference entities (authors, genres,
/// publishing houses).
#[derive(Debug, Default, Clone)]
pub struct LookupFilter {
    /// Restrict to these ids
    pub ids: Option<Vec<i32>>,
    /// Case-insensitive name fragment
    pub name: Option<String>,
}

impl LookupFilter {
    pub fn by_ids(ids: &[i32]) -> Self {
        Self {
            ids: Some(ids.to_vec()),
            name: None,
        }
    }

    pub fn by_name(name: Option<String>) -> Self {
        Self { ids: None, name }
    }
}

/// Input for creating an author
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Input for creating a genre
#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
}

/// Input for creating a publishing house
#[derive(Debug, Clone)]
pub struct NewPublishingHouse {
    pub name: String,
    pub country: String,
    pub city: String,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find a single book with its publishing house, authors and genres
    async fn find_by_id(&self, id: i32) -> Result<Option<BookDetails>, DomainError>;

    /// Find every book, unfiltered and unpaged
    async fn find_all(&self) -> Result<Vec<BookDetails>, DomainError>;

    /// Find books matching the filter criteria
    async fn find(&self, filter: BookFilter) -> Result<Vec<BookDetails>, DomainError>;

    /// Insert a book and its author/genre links, returning it with its new id
    async fn add(&self, book: Book) -> Result<Book, DomainError>;

    /// Overwrite a book and replace all of its author/genre links
    async fn update(&self, book: Book) -> Result<(), DomainError>;

    /// Delete a book and its links
    async fn remove(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    async fn find(&self, filter: LookupFilter) -> Result<Vec<Author>, DomainError>;

    async fn add(&self, author: NewAuthor) -> Result<Author, DomainError>;

    async fn update(&self, author: Author) -> Result<Author, DomainError>;

    async fn remove(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    async fn find(&self, filter: LookupFilter) -> Result<Vec<Genre>, DomainError>;

    async fn add(&self, genre: NewGenre) -> Result<Genre, DomainError>;

    async fn update(&self, genre: Genre) -> Result<Genre, DomainError>;

    async fn remove(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for PublishingHouse entity
#[async_trait]
pub trait PublishingHouseRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<PublishingHouse>, DomainError>;

    async fn find_all(&self) -> Result<Vec<PublishingHouse>, DomainError>;

    async fn find(&self, filter: LookupFilter) -> Result<Vec<PublishingHouse>, DomainError>;

    async fn add(&self, house: NewPublishingHouse) -> Result<PublishingHouse, DomainError>;

    async fn update(&self, house: PublishingHouse) -> Result<PublishingHouse, DomainError>;

    /// Fails with a database error while books still reference the house
    async fn remove(&self, id: i32) -> Result<(), DomainError>;
}

/// A set of staged changes across all repositories.
///
/// Writes made through the repositories become durable together on
/// [`UnitOfWork::commit`]. Dropping the unit of work without committing
/// discards them.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn books(&self) -> Box<dyn BookRepository + '_>;

    fn authors(&self) -> Box<dyn AuthorRepository + '_>;

    fn genres(&self) -> Box<dyn GenreRepository + '_>;

    fn publishing_houses(&self) -> Box<dyn PublishingHouseRepository + '_>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

/// Entry point to the backing store
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new unit of work
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError>;
}
