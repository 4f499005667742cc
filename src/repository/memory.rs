//! In-memory book store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookIdentifier},
};

/// Map-backed store, intended for tests and local runs.
///
/// The lock only makes each call memory-safe; a read followed by a write
/// from the same client is not coordinated with other writers.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<HashMap<BookIdentifier, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        tracing::info!("Using in-memory book store");
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_books(&self) -> AppResult<Vec<BookIdentifier>> {
        Ok(self.books.read().await.keys().cloned().collect())
    }

    async fn get_book(&self, id: &BookIdentifier) -> AppResult<Book> {
        self.books
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create_book(&self, mut book: Book) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let id = book.identifier();
        if books.contains_key(&id) {
            return Err(AppError::AlreadyExists);
        }
        book.touch();
        books.insert(id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, mut book: Book) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let stored = books.get_mut(&book.identifier()).ok_or(AppError::NotFound)?;
        book.touch();
        *stored = book.clone();
        Ok(book)
    }

    async fn delete_book(&self, id: &BookIdentifier) -> AppResult<()> {
        self.books
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn disconnect(&self) {}
}
