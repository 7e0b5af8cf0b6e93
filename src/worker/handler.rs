//! Worker thread implementation for asynchronous favorites operations.
//!
//! This module implements the Zellij worker thread interface, handling all
//! favorites storage I/O off the main plugin rendering loop. It includes
//! distributed tracing support for cross-thread observability.

use crate::domain::error::{Result, ZibraryError};
use crate::domain::Book;
use crate::infrastructure::paths;
use crate::storage::backend::{AddOutcome, FavoritesStore};
use crate::storage::models::FavoriteRecord;
use crate::storage::JsonFavorites;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// File name of the favorites blob inside the plugin data directory.
const FAVORITES_FILE: &str = "favorites.json";

/// Worker thread state for handling favorites operations.
///
/// Runs on a separate thread spawned by Zellij and processes messages sent
/// from the main plugin thread. The store is initialized lazily on first
/// message receipt.
#[derive(Serialize, Deserialize, Default)]
pub struct ZibraryWorker {
    /// Favorites store, initialized lazily on first use.
    #[serde(skip)]
    store: Option<Box<dyn FavoritesStore>>,
}

impl ZibraryWorker {
    /// Creates a worker with an opened JSON favorites store.
    #[must_use]
    pub fn new() -> Self {
        let path = paths::get_data_dir().join(FAVORITES_FILE);
        let store: Box<dyn FavoritesStore> = Box::new(JsonFavorites::open(path));
        Self { store: Some(store) }
    }

    /// Creates a worker backed by an arbitrary store, for tests and embedding.
    #[must_use]
    pub fn with_store(store: Box<dyn FavoritesStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Returns a mutable reference to the store, failing if not initialized.
    fn get_store(&mut self) -> Result<&mut Box<dyn FavoritesStore>> {
        self.store
            .as_mut()
            .ok_or_else(|| ZibraryError::Worker("Store not initialized".to_string()))
    }

    /// Reads the full shelf as domain books, in shelving order.
    fn shelf(&mut self) -> Result<Vec<Book>> {
        let records = self.get_store()?.load_all()?;
        Ok(records.into_iter().map(FavoriteRecord::into_book).collect())
    }

    /// Helper for handling store operation results with consistent logging.
    fn handle_store_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Handles the `LoadFavorites` message.
    fn handle_load_favorites(&mut self) -> WorkerResponse {
        Self::handle_store_result("load favorites", self.shelf(), |favorites| {
            tracing::debug!(favorite_count = favorites.len(), "favorites loaded from storage");
            WorkerResponse::FavoritesLoaded { favorites }
        })
    }

    /// Handles the `AddFavorite` message.
    ///
    /// A duplicate identifier yields [`WorkerResponse::AlreadyFavorite`] with
    /// no mutation; otherwise the book is appended, the shelf persisted, and
    /// the updated collection returned.
    fn handle_add_favorite(&mut self, book: Book) -> WorkerResponse {
        let added_at = chrono::Utc::now().timestamp();
        let record = FavoriteRecord::from_book(&book, added_at);

        let outcome = match self.get_store().and_then(|store| store.add(&record)) {
            Ok(AddOutcome::Added) => self.shelf().map(Some),
            Ok(AddOutcome::AlreadyPresent) => Ok(None),
            Err(e) => Err(e),
        };

        Self::handle_store_result("add favorite", outcome, |maybe_shelf| match maybe_shelf {
            Some(favorites) => {
                tracing::debug!(book_id = %book.id, "favorite added");
                WorkerResponse::FavoriteAdded { favorites }
            }
            None => {
                tracing::debug!(book_id = %book.id, "book already in favorites");
                WorkerResponse::AlreadyFavorite { id: book.id.clone() }
            }
        })
    }

    /// Handles the `RemoveFavorite` message.
    ///
    /// Removal uses filter semantics and settles successfully whether or not
    /// the id was present.
    fn handle_remove_favorite(&mut self, id: String) -> WorkerResponse {
        let result = match self.get_store().and_then(|store| store.remove(&id)) {
            Ok(()) => self.shelf(),
            Err(e) => Err(e),
        };

        Self::handle_store_result("remove favorite", result, |favorites| {
            tracing::debug!(book_id = %id, "favorite removal settled");
            WorkerResponse::FavoriteRemoved { id, favorites }
        })
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information in the message, allowing spans created in the worker thread
    /// to be linked to their parents in the main thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::LoadFavorites { trace_context, .. }
            | WorkerMessage::AddFavorite { trace_context, .. }
            | WorkerMessage::RemoveFavorite { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadFavorites { .. } => self.handle_load_favorites(),
            WorkerMessage::AddFavorite { book, .. } => self.handle_add_favorite(book),
            WorkerMessage::RemoveFavorite { id, .. } => self.handle_remove_favorite(id),
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Sets up the same tracing configuration as the main thread, ensuring spans
/// from both threads land in the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ZibraryWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Lazy-initializes the favorites store if needed
    /// 3. Deserializes the message payload
    /// 4. Processes the message via `handle_message`
    /// 5. Serializes and sends the response back to the main thread
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        if self.store.is_none() {
            self.store = Self::new().store;
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                let plugin_message = PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                };
                post_message_to_plugin(plugin_message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker_in(dir: &std::path::Path) -> ZibraryWorker {
        ZibraryWorker::with_store(Box::new(JsonFavorites::open(dir.join("favorites.json"))))
    }

    fn book(id: &str, title: &str) -> Book {
        Book::new(id, title)
    }

    #[test]
    fn load_on_fresh_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        let response = worker.handle_message(WorkerMessage::load_favorites());
        assert_eq!(
            response,
            WorkerResponse::FavoritesLoaded { favorites: vec![] }
        );
    }

    #[test]
    fn add_returns_updated_shelf() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        let response = worker.handle_message(WorkerMessage::add_favorite(book("1", "Dune")));

        let WorkerResponse::FavoriteAdded { favorites } = response else {
            panic!("expected FavoriteAdded");
        };
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "1");
    }

    #[test]
    fn second_add_of_same_id_signals_already_favorite() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        worker.handle_message(WorkerMessage::add_favorite(book("1", "Dune")));
        let response = worker.handle_message(WorkerMessage::add_favorite(book("1", "Dune")));

        assert_eq!(
            response,
            WorkerResponse::AlreadyFavorite { id: "1".to_string() }
        );

        let loaded = worker.handle_message(WorkerMessage::load_favorites());
        let WorkerResponse::FavoritesLoaded { favorites } = loaded else {
            panic!("expected FavoritesLoaded");
        };
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn remove_signals_removed_even_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        let response =
            worker.handle_message(WorkerMessage::remove_favorite("ghost".to_string()));

        assert_eq!(
            response,
            WorkerResponse::FavoriteRemoved {
                id: "ghost".to_string(),
                favorites: vec![],
            }
        );
    }

    #[test]
    fn add_then_remove_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        worker.handle_message(WorkerMessage::add_favorite(book("1", "Dune")));
        let response = worker.handle_message(WorkerMessage::remove_favorite("1".to_string()));

        let WorkerResponse::FavoriteRemoved { favorites, .. } = response else {
            panic!("expected FavoriteRemoved");
        };
        assert!(favorites.is_empty());
    }

    #[test]
    fn shelving_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let mut worker = worker_in(dir.path());

        worker.handle_message(WorkerMessage::add_favorite(book("b", "Beta")));
        worker.handle_message(WorkerMessage::add_favorite(book("a", "Alpha")));

        let WorkerResponse::FavoritesLoaded { favorites } =
            worker.handle_message(WorkerMessage::load_favorites())
        else {
            panic!("expected FavoritesLoaded");
        };
        assert_eq!(favorites[0].id, "b");
        assert_eq!(favorites[1].id, "a");
    }
}
