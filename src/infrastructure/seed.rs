use crate::models::{author, genre, publishing_house};
use sea_orm::*;

const DEMO_AUTHORS: &[(&str, &str)] = &[
    ("Frank", "Herbert"),
    ("Ursula K.", "Le Guin"),
    ("Isaac", "Asimov"),
    ("J.R.R.", "Tolkien"),
];

const DEMO_GENRES: &[&str] = &["Fantasy", "Science Fiction", "Mystery", "Non-Fiction"];

/// Insert demo authors, genres and a publishing house.
///
/// Does nothing when authors already exist, so it is safe to run on every start.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if author::Entity::find().count(db).await? > 0 {
        tracing::debug!("Catalog already has authors, skipping demo seed");
        return Ok(());
    }

    let txn = db.begin().await?;

    // 1. Authors
    author::Entity::insert_many(DEMO_AUTHORS.iter().map(|(first, last)| author::ActiveModel {
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        ..Default::default()
    }))
    .exec_without_returning(&txn)
    .await?;

    // 2. Genres
    genre::Entity::insert_many(DEMO_GENRES.iter().map(|name| genre::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }))
    .exec_without_returning(&txn)
    .await?;

    // 3. Publishing house
    publishing_house::ActiveModel {
        name: Set("Ace Books".to_owned()),
        country: Set("US".to_owned()),
        city: Set("New York".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        "Seeded {} authors and {} genres",
        DEMO_AUTHORS.len(),
        DEMO_GENRES.len()
    );
    Ok(())
}
