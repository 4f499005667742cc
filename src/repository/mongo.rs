//! MongoDB book store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOneOptions, FindOptions},
    Client, Collection,
};

use super::BookStore;
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{book::PARAM_AUTHOR, book::PARAM_NAME, Book, BookIdentifier},
};

/// Document-database store. One document per book, matched on name and author.
#[derive(Clone)]
pub struct MongoBookStore {
    client: Client,
    collection: Collection<Book>,
}

impl MongoBookStore {
    /// Connect and ping the server before handing out the store
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        tracing::info!("Connecting to MongoDB");
        let client = Client::with_uri_str(&config.url).await?;

        tracing::debug!("Pinging MongoDB");
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;

        tracing::info!(
            "Connected to MongoDB, using {}.{}",
            config.name,
            config.collection
        );
        Ok(Self {
            collection: client.database(&config.name).collection(&config.collection),
            client,
        })
    }

    fn key_filter(id: &BookIdentifier) -> Document {
        doc! { PARAM_NAME: id.name.as_str(), PARAM_AUTHOR: id.author.as_str() }
    }

    fn key_projection() -> Document {
        doc! { PARAM_NAME: 1, PARAM_AUTHOR: 1, "_id": 0 }
    }

    async fn exists(&self, id: &BookIdentifier) -> AppResult<bool> {
        let options = FindOneOptions::builder()
            .projection(Self::key_projection())
            .build();
        let found = self
            .collection
            .clone_with_type::<BookIdentifier>()
            .find_one(Self::key_filter(id), options)
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list_books(&self) -> AppResult<Vec<BookIdentifier>> {
        let options = FindOptions::builder()
            .projection(Self::key_projection())
            .build();
        let cursor = self
            .collection
            .clone_with_type::<BookIdentifier>()
            .find(doc! {}, options)
            .await?;
        let ids: Vec<BookIdentifier> = cursor.try_collect().await?;
        Ok(ids)
    }

    async fn get_book(&self, id: &BookIdentifier) -> AppResult<Book> {
        self.collection
            .find_one(Self::key_filter(id), None)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_book(&self, mut book: Book) -> AppResult<Book> {
        if self.exists(&book.identifier()).await? {
            return Err(AppError::AlreadyExists);
        }
        book.touch();
        self.collection.insert_one(&book, None).await.map_err(|e| {
            tracing::error!("Cannot insert document: {}", e);
            AppError::from(e)
        })?;
        Ok(book)
    }

    async fn update_book(&self, mut book: Book) -> AppResult<Book> {
        book.touch();
        let update = doc! { "$set": bson::to_document(&book)? };
        let result = self
            .collection
            .update_one(Self::key_filter(&book.identifier()), update, None)
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(book)
    }

    async fn delete_book(&self, id: &BookIdentifier) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(Self::key_filter(id), None)
            .await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound);
        }
        tracing::debug!("Deleted {} document(s)", result.deleted_count);
        Ok(())
    }

    async fn disconnect(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("Disconnected from MongoDB");
    }
}
