//! Transaction-backed unit of work and the store that opens it

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{
    SeaOrmAuthorRepository, SeaOrmBookRepository, SeaOrmGenreRepository,
    SeaOrmPublishingHouseRepository,
};
use crate::domain::{
    AuthorRepository, BookRepository, DomainError, GenreRepository, PublishingHouseRepository,
    Store, UnitOfWork,
};

/// Groups the repositories over a single database transaction.
///
/// Dropping it without calling `commit` rolls the transaction back.
pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn books(&self) -> Box<dyn BookRepository + '_> {
        Box::new(SeaOrmBookRepository::new(&self.txn))
    }

    fn authors(&self) -> Box<dyn AuthorRepository + '_> {
        Box::new(SeaOrmAuthorRepository::new(&self.txn))
    }

    fn genres(&self) -> Box<dyn GenreRepository + '_> {
        Box::new(SeaOrmGenreRepository::new(&self.txn))
    }

    fn publishing_houses(&self) -> Box<dyn PublishingHouseRepository + '_> {
        Box::new(SeaOrmPublishingHouseRepository::new(&self.txn))
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let uow = *self;
        uow.txn.commit().await?;
        Ok(())
    }
}

/// SeaORM-based implementation of Store
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmUnitOfWork { txn }))
    }
}
