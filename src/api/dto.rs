//! Wire shapes for requests and responses.
//!
//! Responses flatten the entity graph: authors become "First Last" strings,
//! genres become their names, and the publishing house is nested.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Author, BookDetails, Genre, NewAuthor, NewGenre, NewPublishingHouse, PublishingHouse};
use crate::services::{CreateBookInput, ListBooksInput, PublishingHouseInput, UpdateBookInput};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishingHouseDto {
    /// 0 (or absent) asks for a new publishing house on book creation
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
}

impl From<PublishingHouse> for PublishingHouseDto {
    fn from(house: PublishingHouse) -> Self {
        Self {
            id: house.id,
            name: house.name,
            country: house.country,
            city: house.city,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i32,
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house: PublishingHouseDto,
    /// Full names, "First Last"
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl From<BookDetails> for BookResponse {
    fn from(book: BookDetails) -> Self {
        Self {
            id: book.id,
            name: book.name,
            release_date: book.release_date,
            publishing_house: book.publishing_house.into(),
            authors: book.authors.iter().map(Author::full_name).collect(),
            genres: book.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookCreateRequest {
    pub name: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub publishing_house: PublishingHouseDto,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl From<BookCreateRequest> for CreateBookInput {
    fn from(req: BookCreateRequest) -> Self {
        Self {
            name: req.name,
            release_date: req.release_date,
            publishing_house: PublishingHouseInput {
                id: req.publishing_house.id,
                name: req.publishing_house.name,
                country: req.publishing_house.country,
                city: req.publishing_house.city,
            },
            author_ids: req.author_ids,
            genre_ids: req.genre_ids,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateRequest {
    pub name: String,
    pub release_date: NaiveDate,
    pub publishing_house_id: i32,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl From<BookUpdateRequest> for UpdateBookInput {
    fn from(req: BookUpdateRequest) -> Self {
        Self {
            name: req.name,
            release_date: req.release_date,
            publishing_house_id: req.publishing_house_id,
            author_ids: req.author_ids,
            genre_ids: req.genre_ids,
        }
    }
}

/// Query string for `GET /books`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Inclusive lower bound, YYYY-MM-DD
    pub from_release_date: Option<NaiveDate>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub to_release_date: Option<NaiveDate>,
    /// 1-based page number, default 1
    pub page: Option<u64>,
    /// Items per page, default 10, at most 100
    pub page_size: Option<u64>,
}

impl From<ListBooksQuery> for ListBooksInput {
    fn from(q: ListBooksQuery) -> Self {
        Self {
            from_release_date: q.from_release_date,
            to_release_date: q.to_release_date,
            page: q.page,
            page_size: q.page_size,
        }
    }
}

/// Optional name fragment for the reference-data listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
}

impl From<CreateAuthorRequest> for NewAuthor {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateGenreRequest {
    pub name: String,
}

impl From<CreateGenreRequest> for NewGenre {
    fn from(req: CreateGenreRequest) -> Self {
        Self { name: req.name }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePublishingHouseRequest {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
}

impl From<CreatePublishingHouseRequest> for NewPublishingHouse {
    fn from(req: CreatePublishingHouseRequest) -> Self {
        Self {
            name: req.name,
            country: req.country,
            city: req.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> BookDetails {
        BookDetails {
            id: 1,
            name: "Dune".to_string(),
            release_date: NaiveDate::from_ymd_opt(1965, 6, 1).unwrap(),
            publishing_house: PublishingHouse {
                id: 4,
                name: "Chilton".to_string(),
                country: "US".to_string(),
                city: "Philadelphia".to_string(),
            },
            authors: vec![Author {
                id: 1,
                first_name: "Frank".to_string(),
                last_name: "Herbert".to_string(),
            }],
            genres: vec![Genre {
                id: 2,
                name: "Science Fiction".to_string(),
            }],
        }
    }

    #[test]
    fn test_book_response_flattens_graph() {
        let json = serde_json::to_value(BookResponse::from(dune())).unwrap();

        assert_eq!(json["releaseDate"], "1965-06-01");
        assert_eq!(json["publishingHouse"]["city"], "Philadelphia");
        assert_eq!(json["authors"], serde_json::json!(["Frank Herbert"]));
        assert_eq!(json["genres"], serde_json::json!(["Science Fiction"]));
    }

    #[test]
    fn test_create_request_accepts_house_by_id_only() {
        let req: BookCreateRequest = serde_json::from_value(serde_json::json!({
            "name": "Children of Dune",
            "releaseDate": "1976-04-01",
            "publishingHouse": { "id": 4 },
            "authorIds": [1],
            "genreIds": [2]
        }))
        .unwrap();

        let input = CreateBookInput::from(req);
        assert_eq!(input.publishing_house.id, 4);
        assert!(input.publishing_house.name.is_empty());
    }
}
