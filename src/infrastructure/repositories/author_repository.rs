//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Author, AuthorRepository, DomainError, LookupFilter, NewAuthor};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> SeaOrmAuthorRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository<'_> {
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(self.txn).await?;
        Ok(author.map(Author::from))
    }

    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        self.find(LookupFilter::default()).await
    }

    async fn find(&self, filter: LookupFilter) -> Result<Vec<Author>, DomainError> {
        let mut query = AuthorEntity::find();

        if let Some(ids) = filter.ids {
            query = query.filter(Column::Id.is_in(ids));
        }

        if let Some(name) = filter.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            let cond = Condition::any()
                .add(Column::FirstName.contains(name))
                .add(Column::LastName.contains(name));
            query = query.filter(cond);
        }

        let authors = query
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(self.txn)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn add(&self, author: NewAuthor) -> Result<Author, DomainError> {
        let author = ActiveModel {
            first_name: Set(author.first_name),
            last_name: Set(author.last_name),
            ..Default::default()
        };

        let result = author.insert(self.txn).await?;
        Ok(Author::from(result))
    }

    async fn update(&self, author: Author) -> Result<Author, DomainError> {
        let existing = AuthorEntity::find_by_id(author.id)
            .one(self.txn)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Author {}", author.id)))?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(author.first_name);
        active.last_name = Set(author.last_name);

        let result = active.update(self.txn).await?;
        Ok(Author::from(result))
    }

    async fn remove(&self, id: i32) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id).exec(self.txn).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(format!("Author {}", id)));
        }

        Ok(())
    }
}
