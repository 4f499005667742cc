//! Book models

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// `updatedDate` layout, e.g. `Mon Jan  2 15:04:05 UTC 2006`
pub const DB_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Path parameter carrying the book name
pub const PARAM_NAME: &str = "name";
/// Path parameter carrying the book author
pub const PARAM_AUTHOR: &str = "author";

/// Natural key of a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct BookIdentifier {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
}

impl BookIdentifier {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
        }
    }

    /// Build an identifier from route parameters.
    /// Both `name` and `author` must be present and non-empty.
    pub fn from_params(params: &HashMap<String, String>) -> AppResult<Self> {
        let name = params.get(PARAM_NAME).ok_or(AppError::IncorrectParameters)?;
        let author = params.get(PARAM_AUTHOR).ok_or(AppError::IncorrectParameters)?;
        if name.is_empty() || author.is_empty() {
            return Err(AppError::IncorrectParameters);
        }
        Ok(Self::new(name.as_str(), author.as_str()))
    }
}

/// Stored book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1))]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1))]
    pub contents: String,
    /// Set by the store on every create and update
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_date: String,
}

impl Book {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            contents: contents.into(),
            updated_date: String::new(),
        }
    }

    pub fn identifier(&self) -> BookIdentifier {
        BookIdentifier::new(self.name.as_str(), self.author.as_str())
    }

    /// Stamp `updated_date` with the current time
    pub fn touch(&mut self) {
        self.updated_date = now_formatted();
    }

    /// Parse and validate a store request body.
    /// Missing fields count as empty and are rejected.
    pub fn from_request_body(body: &[u8]) -> AppResult<Self> {
        let book: Book = serde_json::from_slice(body)?;
        book.ensure_complete()?;
        Ok(book)
    }

    /// Name, author and contents must all be non-empty
    pub fn ensure_complete(&self) -> AppResult<()> {
        self.validate().map_err(|_| {
            AppError::Validation("not enough information to store book".to_string())
        })
    }
}

/// Current UTC time in [`DB_TIME_FORMAT`]
pub fn now_formatted() -> String {
    Utc::now().format(DB_TIME_FORMAT).to_string()
}
