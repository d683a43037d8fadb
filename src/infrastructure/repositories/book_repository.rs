//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

use crate::domain::{
    Author, Book, BookDetails, BookFilter, BookRepository, DomainError, Genre, MAX_ROW_OFFSET,
};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity};
use crate::models::book_authors::{self, Entity as BookAuthorEntity};
use crate::models::book_genres::{self, Entity as BookGenreEntity};
use crate::models::genre::Entity as GenreEntity;
use crate::models::publishing_house::{self, Entity as PublishingHouseEntity};
use crate::models::book;

/// SeaORM-based implementation of BookRepository, bound to one transaction
pub struct SeaOrmBookRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> SeaOrmBookRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Load authors and genres for a batch of books in two queries
    async fn load_details(
        &self,
        rows: Vec<(book::Model, Option<publishing_house::Model>)>,
    ) -> Result<Vec<BookDetails>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let book_ids: Vec<i32> = rows.iter().map(|(b, _)| b.id).collect();

        let author_links = BookAuthorEntity::find()
            .filter(book_authors::Column::BookId.is_in(book_ids.clone()))
            .order_by_asc(book_authors::Column::AuthorId)
            .find_also_related(AuthorEntity)
            .all(self.txn)
            .await?;

        let mut authors_by_book: HashMap<i32, Vec<Author>> = HashMap::new();
        for (link, author) in author_links {
            if let Some(author) = author {
                authors_by_book
                    .entry(link.book_id)
                    .or_default()
                    .push(Author::from(author));
            }
        }

        let genre_links = BookGenreEntity::find()
            .filter(book_genres::Column::BookId.is_in(book_ids))
            .order_by_asc(book_genres::Column::GenreId)
            .find_also_related(GenreEntity)
            .all(self.txn)
            .await?;

        let mut genres_by_book: HashMap<i32, Vec<Genre>> = HashMap::new();
        for (link, genre) in genre_links {
            if let Some(genre) = genre {
                genres_by_book
                    .entry(link.book_id)
                    .or_default()
                    .push(Genre::from(genre));
            }
        }

        rows.into_iter()
            .map(|(book, house)| {
                let house = house.ok_or_else(|| {
                    DomainError::Internal(format!("Book {} has no publishing house", book.id))
                })?;

                Ok(BookDetails {
                    id: book.id,
                    name: book.name,
                    release_date: book.release_date,
                    publishing_house: house.into(),
                    authors: authors_by_book.remove(&book.id).unwrap_or_default(),
                    genres: genres_by_book.remove(&book.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn insert_links(
        &self,
        book_id: i32,
        author_ids: &[i32],
        genre_ids: &[i32],
    ) -> Result<(), DomainError> {
        if !author_ids.is_empty() {
            BookAuthorEntity::insert_many(author_ids.iter().map(|&author_id| {
                book_authors::ActiveModel {
                    book_id: Set(book_id),
                    author_id: Set(author_id),
                }
            }))
            .exec_without_returning(self.txn)
            .await?;
        }

        if !genre_ids.is_empty() {
            BookGenreEntity::insert_many(genre_ids.iter().map(|&genre_id| {
                book_genres::ActiveModel {
                    book_id: Set(book_id),
                    genre_id: Set(genre_id),
                }
            }))
            .exec_without_returning(self.txn)
            .await?;
        }

        Ok(())
    }

    async fn delete_links(&self, book_id: i32) -> Result<(), DomainError> {
        BookAuthorEntity::delete_many()
            .filter(book_authors::Column::BookId.eq(book_id))
            .exec(self.txn)
            .await?;
        BookGenreEntity::delete_many()
            .filter(book_genres::Column::BookId.eq(book_id))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository<'_> {
    async fn find_by_id(&self, id: i32) -> Result<Option<BookDetails>, DomainError> {
        let row = BookEntity::find_by_id(id)
            .find_also_related(PublishingHouseEntity)
            .one(self.txn)
            .await?;

        match row {
            Some(row) => Ok(self.load_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<BookDetails>, DomainError> {
        self.find(BookFilter::default()).await
    }

    async fn find(&self, filter: BookFilter) -> Result<Vec<BookDetails>, DomainError> {
        let mut query = BookEntity::find().find_also_related(PublishingHouseEntity);

        // Apply filters
        if let Some(from) = filter.from_release_date {
            query = query.filter(Column::ReleaseDate.gte(from));
        }

        if let Some(to) = filter.to_release_date {
            query = query.filter(Column::ReleaseDate.lte(to));
        }

        query = query
            .order_by_desc(Column::ReleaseDate)
            .order_by_asc(publishing_house::Column::Name)
            .order_by_asc(Column::Id);

        // SQLite rejects OFFSET without LIMIT
        if filter.offset.is_some() || filter.limit.is_some() {
            query = query
                .offset(filter.offset.unwrap_or(0).min(MAX_ROW_OFFSET))
                .limit(filter.limit.unwrap_or(MAX_ROW_OFFSET).min(MAX_ROW_OFFSET));
        }

        let rows = query.all(self.txn).await?;
        tracing::debug!("Book query returned {} rows", rows.len());

        self.load_details(rows).await
    }

    async fn add(&self, book: Book) -> Result<Book, DomainError> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(book.name.clone()),
            release_date: Set(book.release_date),
            publishing_house_id: Set(book.publishing_house_id),
        }
        .insert(self.txn)
        .await?;

        self.insert_links(model.id, &book.author_ids, &book.genre_ids)
            .await?;

        Ok(Book {
            id: model.id,
            ..book
        })
    }

    async fn update(&self, book: Book) -> Result<(), DomainError> {
        let existing = BookEntity::find_by_id(book.id)
            .one(self.txn)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Book {}", book.id)))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(book.name);
        active.release_date = Set(book.release_date);
        active.publishing_house_id = Set(book.publishing_house_id);
        active.update(self.txn).await?;

        // Links are rebuilt from scratch, never diffed
        self.delete_links(book.id).await?;
        self.insert_links(book.id, &book.author_ids, &book.genre_ids)
            .await
    }

    async fn remove(&self, id: i32) -> Result<(), DomainError> {
        self.delete_links(id).await?;

        let result = BookEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(format!("Book {}", id)));
        }

        Ok(())
    }
}
