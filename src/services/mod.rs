//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.

pub mod book_service;
pub mod catalog_service;

// Re-export for convenience
pub use book_service::*;
pub use catalog_service::*;
