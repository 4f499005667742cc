//! Business logic services

pub mod library;

use std::sync::Arc;

use crate::repository::BookStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub library: library::LibraryService,
}

impl Services {
    /// Create all services on top of the selected store
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            library: library::LibraryService::new(store),
        }
    }
}
