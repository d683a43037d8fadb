pub mod author;
pub mod books;
pub mod dto;
pub mod error;
pub mod genre;
pub mod health;
pub mod publishing_house;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;

use crate::infrastructure::AppState;

pub fn api_router(db: DatabaseConnection) -> Router {
    api_router_with_state(AppState::new(db))
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route("/authors/:id", get(author::get_author))
        // Genres
        .route("/genres", get(genre::list_genres).post(genre::create_genre))
        .route("/genres/:id", get(genre::get_genre))
        // Publishing houses
        .route(
            "/publishing-houses",
            get(publishing_house::list_publishing_houses)
                .post(publishing_house::create_publishing_house),
        )
        .route(
            "/publishing-houses/:id",
            get(publishing_house::get_publishing_house),
        )
        .with_state(state)
}
