//! Persistence gateway tests, driven through the unit of work without HTTP

use books_catalog::db;
use books_catalog::domain::{
    Book, BookFilter, DomainError, LookupFilter, NewAuthor, NewGenre, NewPublishingHouse, Store,
};
use books_catalog::infrastructure::SeaOrmStore;
use books_catalog::models::{book_authors, book_genres};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

async fn setup_store() -> (DatabaseConnection, SeaOrmStore) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let store = SeaOrmStore::new(db.clone());
    (db, store)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// One house, two authors, two genres; returns (house_id, author_ids, genre_ids)
async fn seed_references(store: &SeaOrmStore) -> (i32, Vec<i32>, Vec<i32>) {
    let uow = store.begin().await.unwrap();

    let house = uow
        .publishing_houses()
        .add(NewPublishingHouse {
            name: "Chilton".to_string(),
            country: "US".to_string(),
            city: "Philadelphia".to_string(),
        })
        .await
        .unwrap();

    let mut author_ids = Vec::new();
    for (first, last) in [("Frank", "Herbert"), ("Brian", "Herbert")] {
        let author = uow
            .authors()
            .add(NewAuthor {
                first_name: first.to_string(),
                last_name: last.to_string(),
            })
            .await
            .unwrap();
        author_ids.push(author.id);
    }

    let mut genre_ids = Vec::new();
    for name in ["Science Fiction", "Fantasy"] {
        let genre = uow
            .genres()
            .add(NewGenre {
                name: name.to_string(),
            })
            .await
            .unwrap();
        genre_ids.push(genre.id);
    }

    uow.commit().await.unwrap();
    (house.id, author_ids, genre_ids)
}

#[tokio::test]
async fn test_dropped_unit_of_work_discards_changes() {
    let (_db, store) = setup_store().await;

    {
        let uow = store.begin().await.unwrap();
        uow.genres()
            .add(NewGenre {
                name: "Horror".to_string(),
            })
            .await
            .unwrap();
        // Visible inside its own unit of work
        assert_eq!(uow.genres().find_all().await.unwrap().len(), 1);
    }

    let uow = store.begin().await.unwrap();
    assert!(uow.genres().find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_round_trip_with_links() {
    let (_db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    let book = Book::new(
        "Dune".to_string(),
        date(1965, 6, 1),
        house_id,
        &[authors[1], authors[0], authors[1]],
        &[genres[0]],
    );
    let added = uow.books().add(book).await.unwrap();
    assert_ne!(added.id, 0);
    uow.commit().await.unwrap();

    let uow = store.begin().await.unwrap();
    let details = uow.books().find_by_id(added.id).await.unwrap().unwrap();
    assert_eq!(details.name, "Dune");
    assert_eq!(details.publishing_house.name, "Chilton");
    // Authors come back ordered by id, each once
    let ids: Vec<i32> = details.authors.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![authors[0], authors[1]]);
    assert_eq!(details.genres.len(), 1);

    assert!(uow.books().find_by_id(added.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_book_with_unknown_house_violates_foreign_key() {
    let (_db, store) = setup_store().await;
    let (_, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    let book = Book::new(
        "Orphan".to_string(),
        date(2000, 1, 1),
        999,
        &authors,
        &genres,
    );
    let result = uow.books().add(book).await;
    assert!(matches!(result, Err(DomainError::Database(_))));
}

#[tokio::test]
async fn test_update_replaces_links_and_remove_cascades() {
    let (db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    let book = uow
        .books()
        .add(Book::new(
            "Draft".to_string(),
            date(1999, 1, 1),
            house_id,
            &authors,
            &genres,
        ))
        .await
        .unwrap();

    let mut changed = Book::new(
        "Final".to_string(),
        date(2000, 1, 1),
        house_id,
        &[authors[1]],
        &[genres[1]],
    );
    changed.id = book.id;
    uow.books().update(changed).await.unwrap();

    let details = uow.books().find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(details.name, "Final");
    assert_eq!(details.authors.len(), 1);
    assert_eq!(details.authors[0].id, authors[1]);
    assert_eq!(details.genres[0].id, genres[1]);

    uow.books().remove(book.id).await.unwrap();
    assert!(matches!(
        uow.books().remove(book.id).await,
        Err(DomainError::NotFound(_))
    ));
    uow.commit().await.unwrap();

    let author_links = book_authors::Entity::find()
        .filter(book_authors::Column::BookId.eq(book.id))
        .count(&db)
        .await
        .unwrap();
    let genre_links = book_genres::Entity::find()
        .filter(book_genres::Column::BookId.eq(book.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(author_links, 0);
    assert_eq!(genre_links, 0);
}

#[tokio::test]
async fn test_update_missing_book_is_not_found() {
    let (_db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    let mut book = Book::new(
        "Ghost".to_string(),
        date(2000, 1, 1),
        house_id,
        &authors,
        &genres,
    );
    book.id = 42;
    assert!(matches!(
        uow.books().update(book).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_find_books_pages_after_ordering() {
    let (_db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    for (name, year) in [("Old", 1950), ("New", 2020), ("Mid", 1985)] {
        uow.books()
            .add(Book::new(
                name.to_string(),
                date(year, 1, 1),
                house_id,
                &authors,
                &genres,
            ))
            .await
            .unwrap();
    }

    let all = uow.books().find_all().await.unwrap();
    let names: Vec<&str> = all.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["New", "Mid", "Old"]);

    let page = uow
        .books()
        .find(BookFilter {
            offset: Some(1),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Mid");

    let ranged = uow
        .books()
        .find(BookFilter {
            from_release_date: Some(date(1950, 1, 1)),
            to_release_date: Some(date(1985, 1, 1)),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = ranged.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Mid", "Old"]);
}

#[tokio::test]
async fn test_reference_lookups_update_and_remove() {
    let (_db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();

    let found = uow
        .authors()
        .find(LookupFilter::by_ids(&[authors[0], 999]))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let by_name = uow
        .authors()
        .find(LookupFilter::by_name(Some("brian".to_string())))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, authors[1]);

    let mut author = found[0].clone();
    author.first_name = "Franklin".to_string();
    let updated = uow.authors().update(author).await.unwrap();
    assert_eq!(updated.full_name(), "Franklin Herbert");

    let mut genre = uow.genres().find_by_id(genres[1]).await.unwrap().unwrap();
    genre.name = "High Fantasy".to_string();
    uow.genres().update(genre).await.unwrap();
    assert_eq!(
        uow.genres().find_by_id(genres[1]).await.unwrap().unwrap().name,
        "High Fantasy"
    );

    uow.authors().remove(authors[1]).await.unwrap();
    assert!(matches!(
        uow.authors().remove(authors[1]).await,
        Err(DomainError::NotFound(_))
    ));
    uow.genres().remove(genres[0]).await.unwrap();

    let mut house = uow
        .publishing_houses()
        .find_by_id(house_id)
        .await
        .unwrap()
        .unwrap();
    house.city = "Radnor".to_string();
    let house = uow.publishing_houses().update(house).await.unwrap();
    assert_eq!(house.city, "Radnor");

    uow.commit().await.unwrap();

    let uow = store.begin().await.unwrap();
    assert_eq!(uow.authors().find_all().await.unwrap().len(), 1);
    assert_eq!(uow.genres().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_referenced_publishing_house_cannot_be_removed() {
    let (_db, store) = setup_store().await;
    let (house_id, authors, genres) = seed_references(&store).await;

    let uow = store.begin().await.unwrap();
    uow.books()
        .add(Book::new(
            "Dune".to_string(),
            date(1965, 6, 1),
            house_id,
            &authors,
            &genres,
        ))
        .await
        .unwrap();

    assert!(matches!(
        uow.publishing_houses().remove(house_id).await,
        Err(DomainError::Database(_))
    ));
}
