//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, Genre, GenreRepository, LookupFilter, NewGenre};
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> SeaOrmGenreRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository<'_> {
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(self.txn).await?;
        Ok(genre.map(Genre::from))
    }

    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        self.find(LookupFilter::default()).await
    }

    async fn find(&self, filter: LookupFilter) -> Result<Vec<Genre>, DomainError> {
        let mut query = GenreEntity::find();

        if let Some(ids) = filter.ids {
            query = query.filter(Column::Id.is_in(ids));
        }

        if let Some(name) = filter.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            query = query.filter(Column::Name.contains(name));
        }

        let genres = query.order_by_asc(Column::Name).all(self.txn).await?;
        Ok(genres.into_iter().map(Genre::from).collect())
    }

    async fn add(&self, genre: NewGenre) -> Result<Genre, DomainError> {
        let genre = ActiveModel {
            name: Set(genre.name),
            ..Default::default()
        };

        let result = genre.insert(self.txn).await?;
        Ok(Genre::from(result))
    }

    async fn update(&self, genre: Genre) -> Result<Genre, DomainError> {
        let existing = GenreEntity::find_by_id(genre.id)
            .one(self.txn)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Genre {}", genre.id)))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(genre.name);

        let result = active.update(self.txn).await?;
        Ok(Genre::from(result))
    }

    async fn remove(&self, id: i32) -> Result<(), DomainError> {
        let result = GenreEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(format!("Genre {}", id)));
        }

        Ok(())
    }
}
