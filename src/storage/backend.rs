//! Storage backend abstraction for the favorites shelf.
//!
//! This module defines the [`FavoritesStore`] trait that abstracts over
//! persistence backends. The trait is minimal and maps one method per use case
//! in the worker thread; it is not a generic ORM.

use crate::domain::error::Result;
use crate::storage::models::FavoriteRecord;

/// Outcome of an add operation.
///
/// The shelf is deduplicated by book identifier, and a duplicate add is the one
/// error-like condition this application surfaces to the user, so it is a named
/// outcome rather than an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The book was appended to the shelf and the shelf was persisted.
    Added,

    /// A book with the same identifier is already shelved; nothing changed.
    AlreadyPresent,
}

/// Abstraction over favorites persistence backends.
///
/// Implementations own the full shelf in memory and write the entire collection
/// through on every mutation — there is no incremental diffing and no separate
/// flush step.
///
/// # Implementations
///
/// - [`JsonFavorites`](crate::storage::JsonFavorites): single JSON blob file
///   with atomic writes (default)
pub trait FavoritesStore: Send {
    /// Returns the full shelf in shelving order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce the collection.
    fn load_all(&self) -> Result<Vec<FavoriteRecord>>;

    /// Adds a book to the end of the shelf unless its id is already present.
    ///
    /// On [`AddOutcome::Added`] the updated collection has been persisted;
    /// on [`AddOutcome::AlreadyPresent`] nothing was mutated or written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot perform the operation at all.
    /// A persistence failure after an in-memory mutation is not an error:
    /// the mutation stands and durability is silently lost.
    fn add(&mut self, record: &FavoriteRecord) -> Result<AddOutcome>;

    /// Removes any record with the matching id (no-op if absent) and persists.
    ///
    /// Succeeds whether or not anything was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot perform the operation at all.
    fn remove(&mut self, id: &str) -> Result<()>;
}
