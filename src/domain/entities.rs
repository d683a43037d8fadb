//! Domain entities
//!
//! Plain data carried between the persistence gateway and the services.
//! They mirror the relational schema without depending on SeaORM.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// "First Last", as shown in book listings
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishingHouse {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
}

/// A book row together with the ids of its author and genre links.
///
/// `id` is 0 until the book has been added to a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house_id: i32,
    pub author_ids: Vec<i32>,
    pub genre_ids: Vec<i32>,
}

impl Book {
    /// Builds a book whose link lists hold each id once.
    pub fn new(
        name: String,
        release_date: NaiveDate,
        publishing_house_id: i32,
        author_ids: &[i32],
        genre_ids: &[i32],
    ) -> Self {
        Self {
            id: 0,
            name,
            release_date,
            publishing_house_id,
            author_ids: distinct_ids(author_ids),
            genre_ids: distinct_ids(genre_ids),
        }
    }
}

/// A book with its publishing house, authors and genres loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub id: i32,
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house: PublishingHouse,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
