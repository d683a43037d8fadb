pub mod author;
pub mod book;
pub mod book_authors;
pub mod book_genres;
pub mod genre;
pub mod publishing_house;
