//! JSON blob storage backend for the favorites shelf.
//!
//! The entire shelf is serialized as one JSON array of records under a single
//! fixed file — the plugin's key-value store with exactly one key. Writes are
//! atomic (write-to-temp + rename) so a crash never leaves a half-written blob.
//!
//! Failure policy, deliberately lenient:
//! - A missing or unreadable blob on open is treated as an empty shelf.
//! - A failed write is logged and swallowed; the in-memory shelf keeps the
//!   mutation and durability is silently lost until the next successful write.

use crate::storage::backend::{AddOutcome, FavoritesStore};
use crate::storage::models::FavoriteRecord;
use crate::domain::error::Result;
use std::path::PathBuf;

/// JSON file storage for the favorites shelf.
///
/// Keeps the full collection in memory and writes it through on every
/// mutation.
///
/// # Thread Safety
///
/// `Send` but not `Sync`; designed to be owned by the single worker thread,
/// matching the Zellij plugin architecture.
///
/// # File Format
///
/// ```json
/// [
///   {
///     "id": "hp1",
///     "title": "Harry Potter and the Philosopher's Stone",
///     "description": "A boy discovers he is a wizard.",
///     "published_date": "1997",
///     "publisher": "Bloomsbury",
///     "thumbnail": "http://example.com/hp1.jpg",
///     "added_at": 1717171717
///   }
/// ]
/// ```
pub struct JsonFavorites {
    /// Path to the blob file on disk.
    file_path: PathBuf,

    /// In-memory shelf, loaded once on open.
    records: Vec<FavoriteRecord>,
}

impl JsonFavorites {
    /// Opens the favorites blob at the given path.
    ///
    /// Creates parent directories when possible. An absent, unreadable, or
    /// corrupt blob yields an empty shelf — open never fails, mirroring the
    /// load-or-start-empty behavior the rest of the plugin assumes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zibrary::storage::JsonFavorites;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFavorites::open(PathBuf::from("/tmp/favorites.json"));
    /// ```
    #[must_use]
    pub fn open(file_path: PathBuf) -> Self {
        tracing::debug!(path = ?file_path, "opening favorites blob");

        if let Some(parent) = file_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::debug!(parent = ?parent, error = %e, "could not create data directory");
            }
        }

        let records = Self::load_from_file(&file_path);

        tracing::debug!(favorite_count = records.len(), "favorites blob opened");

        Self { file_path, records }
    }

    /// Reads and parses the blob, treating every failure as an empty shelf.
    fn load_from_file(path: &PathBuf) -> Vec<FavoriteRecord> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(error = %e, "favorites blob unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<FavoriteRecord>>(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!(error = %e, "favorites blob corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Writes the whole shelf to disk atomically.
    ///
    /// Serializes the full collection, writes to a temporary sibling, then
    /// renames over the blob. Any failure is logged and swallowed.
    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.records) {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize favorites, write skipped");
                return;
            }
        };

        let tmp_path = self.file_path.with_extension("tmp");

        if let Err(e) = std::fs::write(&tmp_path, json) {
            tracing::debug!(error = %e, "failed to write favorites temp file, write skipped");
            return;
        }

        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            tracing::debug!(error = %e, "failed to rename favorites temp file, write skipped");
            return;
        }

        tracing::debug!(favorite_count = self.records.len(), "favorites persisted");
    }
}

impl FavoritesStore for JsonFavorites {
    fn load_all(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self.records.clone())
    }

    fn add(&mut self, record: &FavoriteRecord) -> Result<AddOutcome> {
        let _span = tracing::debug_span!("json_add_favorite",
            book_id = %record.id,
            title = %record.title
        )
        .entered();

        if self.records.iter().any(|existing| existing.id == record.id) {
            tracing::debug!("book already shelved, no mutation");
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.records.push(record.clone());
        self.persist();

        tracing::debug!(favorite_count = self.records.len(), "favorite added");
        Ok(AddOutcome::Added)
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_favorite", book_id = %id).entered();

        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = before - self.records.len();

        self.persist();

        tracing::debug!(
            removed_count = removed,
            favorite_count = self.records.len(),
            "favorite removal settled"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;

    fn record(id: &str, title: &str) -> FavoriteRecord {
        FavoriteRecord::from_book(&Book::new(id, title), 1_700_000_000)
    }

    fn blob_on_disk(store: &JsonFavorites) -> Vec<FavoriteRecord> {
        let contents = std::fs::read_to_string(&store.file_path).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFavorites::open(dir.path().join("favorites.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn open_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFavorites::open(path);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn add_persists_full_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFavorites::open(dir.path().join("favorites.json"));

        assert_eq!(store.add(&record("1", "Dune")).unwrap(), AddOutcome::Added);

        let on_disk = blob_on_disk(&store);
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].id, "1");
    }

    #[test]
    fn duplicate_add_is_reported_and_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFavorites::open(dir.path().join("favorites.json"));

        store.add(&record("1", "Dune")).unwrap();
        assert_eq!(
            store.add(&record("1", "Dune")).unwrap(),
            AddOutcome::AlreadyPresent
        );

        assert_eq!(store.load_all().unwrap().len(), 1);
        assert_eq!(blob_on_disk(&store).len(), 1);
    }

    #[test]
    fn add_then_remove_round_trips_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFavorites::open(dir.path().join("favorites.json"));

        store.add(&record("1", "Dune")).unwrap();
        store.remove("1").unwrap();

        assert!(store.load_all().unwrap().is_empty());
        assert!(blob_on_disk(&store).is_empty());
    }

    #[test]
    fn remove_of_absent_id_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFavorites::open(dir.path().join("favorites.json"));

        store.add(&record("1", "Dune")).unwrap();
        store.remove("ghost").unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn shelf_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        {
            let mut store = JsonFavorites::open(path.clone());
            store.add(&record("1", "Dune")).unwrap();
            store.add(&record("2", "Hyperion")).unwrap();
        }

        let reopened = JsonFavorites::open(path);
        let records = reopened.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].id, "2");
    }
}
