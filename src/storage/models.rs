//! Storage record models for the favorites persistence layer.
//!
//! This module defines the raw storage record type used for persistence
//! operations. It is separate from the domain [`Book`] to keep the persisted
//! representation (which additionally remembers when a book was shelved) apart
//! from business logic.

use crate::domain::Book;
use serde::{Deserialize, Serialize};

/// One favorited book as persisted in the favorites blob.
///
/// Mirrors the domain [`Book`] field-for-field plus an `added_at` Unix
/// timestamp. Records are stored as a JSON array in shelving order, so the
/// on-disk order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Catalog identifier; the deduplication key for the shelf.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Optional publication date, unformatted.
    pub published_date: Option<String>,

    /// Optional publisher name.
    pub publisher: Option<String>,

    /// Optional thumbnail image URI.
    pub thumbnail: Option<String>,

    /// Unix timestamp of when the book was added to the shelf.
    #[serde(default)]
    pub added_at: i64,
}

impl FavoriteRecord {
    /// Creates a record from a domain book with the given shelving timestamp.
    #[must_use]
    pub fn from_book(book: &Book, added_at: i64) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            description: book.description.clone(),
            published_date: book.published_date.clone(),
            publisher: book.publisher.clone(),
            thumbnail: book.thumbnail.clone(),
            added_at,
        }
    }

    /// Converts this record back into a domain book, dropping storage-only fields.
    #[must_use]
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            description: self.description,
            published_date: self.published_date,
            publisher: self.publisher,
            thumbnail: self.thumbnail,
        }
    }
}
