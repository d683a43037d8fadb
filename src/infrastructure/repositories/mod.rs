//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_repository;
pub mod genre_repository;
pub mod publishing_house_repository;
pub mod unit_of_work;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;
pub use genre_repository::SeaOrmGenreRepository;
pub use publishing_house_repository::SeaOrmPublishingHouseRepository;
pub use unit_of_work::{SeaOrmStore, SeaOrmUnitOfWork};
