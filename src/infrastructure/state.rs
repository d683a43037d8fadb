//! Application state containing the store and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::Store;
use crate::infrastructure::SeaOrmStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Opens units of work against the catalog database
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Create a new AppState backed by SeaORM
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_store(Arc::new(SeaOrmStore::new(db)))
    }

    /// Create an AppState over any store implementation
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
