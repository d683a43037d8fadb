//! SeaORM implementation of PublishingHouseRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, LookupFilter, NewPublishingHouse, PublishingHouse, PublishingHouseRepository,
};
use crate::models::publishing_house::{ActiveModel, Column, Entity as PublishingHouseEntity};

/// SeaORM-based implementation of PublishingHouseRepository
pub struct SeaOrmPublishingHouseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> SeaOrmPublishingHouseRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl PublishingHouseRepository for SeaOrmPublishingHouseRepository<'_> {
    async fn find_by_id(&self, id: i32) -> Result<Option<PublishingHouse>, DomainError> {
        let house = PublishingHouseEntity::find_by_id(id).one(self.txn).await?;
        Ok(house.map(PublishingHouse::from))
    }

    async fn find_all(&self) -> Result<Vec<PublishingHouse>, DomainError> {
        self.find(LookupFilter::default()).await
    }

    async fn find(&self, filter: LookupFilter) -> Result<Vec<PublishingHouse>, DomainError> {
        let mut query = PublishingHouseEntity::find();

        if let Some(ids) = filter.ids {
            query = query.filter(Column::Id.is_in(ids));
        }

        if let Some(name) = filter.name.as_deref().map(str::trim)
            && !name.is_empty()
        {
            query = query.filter(Column::Name.contains(name));
        }

        let houses = query
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(self.txn)
            .await?;
        Ok(houses.into_iter().map(PublishingHouse::from).collect())
    }

    async fn add(&self, house: NewPublishingHouse) -> Result<PublishingHouse, DomainError> {
        let house = ActiveModel {
            name: Set(house.name),
            country: Set(house.country),
            city: Set(house.city),
            ..Default::default()
        };

        let result = house.insert(self.txn).await?;
        Ok(PublishingHouse::from(result))
    }

    async fn update(&self, house: PublishingHouse) -> Result<PublishingHouse, DomainError> {
        let existing = PublishingHouseEntity::find_by_id(house.id)
            .one(self.txn)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Publishing house {}", house.id)))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(house.name);
        active.country = Set(house.country);
        active.city = Set(house.city);

        let result = active.update(self.txn).await?;
        Ok(PublishingHouse::from(result))
    }

    async fn remove(&self, id: i32) -> Result<(), DomainError> {
        let result = PublishingHouseEntity::delete_by_id(id)
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(format!("Publishing house {}", id)));
        }

        Ok(())
    }
}
