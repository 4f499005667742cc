//! Data models for the library

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookIdentifier};
