//! Library service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookIdentifier},
    repository::BookStore,
};

#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn BookStore>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list_books(&self) -> AppResult<Vec<BookIdentifier>> {
        self.store.list_books().await
    }

    pub async fn get_book(&self, id: &BookIdentifier) -> AppResult<Book> {
        self.store.get_book(id).await
    }

    pub async fn create_book(&self, book: Book) -> AppResult<Book> {
        book.ensure_complete()?;
        let created = self.store.create_book(book).await?;
        tracing::info!("Stored book {:?} by {:?}", created.name, created.author);
        Ok(created)
    }

    pub async fn update_book(&self, book: Book) -> AppResult<Book> {
        book.ensure_complete()?;
        let updated = self.store.update_book(book).await?;
        tracing::info!("Updated book {:?} by {:?}", updated.name, updated.author);
        Ok(updated)
    }

    pub async fn delete_book(&self, id: &BookIdentifier) -> AppResult<()> {
        self.store.delete_book(id).await?;
        tracing::info!("Deleted book {:?} by {:?}", id.name, id.author);
        Ok(())
    }

    pub async fn disconnect(&self) {
        self.store.disconnect().await
    }
}
