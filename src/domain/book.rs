//! Book domain model.
//!
//! This module defines the core `Book` type representing one catalog entry from
//! the remote volumes endpoint. A book is immutable once fetched: the plugin never
//! edits its fields, it only accumulates books into the results list and copies
//! them onto the favorites shelf.

use serde::{Deserialize, Serialize};

/// One catalog entry, as surfaced by the volumes endpoint.
///
/// The identifier is unique per catalog entry and is the deduplication key for
/// the favorites shelf. All detail fields are optional because the catalog
/// frequently omits them; the card renderer displays them as-is, absent values
/// included.
///
/// # Examples
///
/// ```
/// use zibrary::domain::Book;
///
/// let book = Book::new("wr1", "The Wind in the Willows");
/// assert_eq!(book.id, "wr1");
/// assert!(book.description.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier, unique per entry.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Optional publication date, kept as the unformatted catalog string.
    pub published_date: Option<String>,

    /// Optional publisher name.
    pub publisher: Option<String>,

    /// Optional thumbnail image URI.
    pub thumbnail: Option<String>,
}

impl Book {
    /// Creates a book with only the required fields set.
    ///
    /// Detail fields start out absent; this is primarily a convenience for
    /// tests and for constructing books from sparse catalog items.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            published_date: None,
            publisher: None,
            thumbnail: None,
        }
    }
}
