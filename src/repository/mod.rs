//! Repository layer for book storage

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::AppResult,
    models::{Book, BookIdentifier},
};

pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

/// Storage adapter keyed by (name, author)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Identifiers of every stored book, in no particular order
    async fn list_books(&self) -> AppResult<Vec<BookIdentifier>>;

    async fn get_book(&self, id: &BookIdentifier) -> AppResult<Book>;

    /// Store a new book, stamping `updated_date`.
    /// Fails with `AlreadyExists` if the identifier is taken.
    async fn create_book(&self, book: Book) -> AppResult<Book>;

    /// Overwrite an existing book, re-stamping `updated_date`.
    /// Fails with `NotFound` if the identifier is absent.
    async fn update_book(&self, book: Book) -> AppResult<Book>;

    async fn delete_book(&self, id: &BookIdentifier) -> AppResult<()>;

    /// Release the backend connection
    async fn disconnect(&self);
}

/// Open the backend selected in configuration
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn BookStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryBookStore::new())),
        StoreBackend::Mongo => Ok(Arc::new(MongoBookStore::connect(config).await?)),
    }
}
