//! Search session state and pagination machine.
//!
//! [`SearchSession`] owns everything about the current query lifecycle: the
//! query text, the accumulated result list, the page counter, the two loading
//! flags, and the debounce generation. It is the single writer of the result
//! list; the event handler drives it and translates its decisions into actions.
//!
//! # Lifecycle
//!
//! ```text
//! keystroke → on_query_changed (page=1, new generation)
//!           → [1s quiet period] → begin_search(1) → fetch dispatched
//!           → settle(1, outcome) → list replaced / cleared
//!
//! near end of list → load_next_page → fetch dispatched for page n+1
//!                  → settle(n+1, outcome) → list appended / page rolled back
//! ```
//!
//! A fetch that fails (network error, malformed body) settles as an ignored
//! outcome: no list mutation, flags cleared, nothing surfaced. Overlapping
//! first-page fetches are not guarded against; the most recently settling
//! response wins. A "load more" fetch in flight, however, suppresses any new
//! search from starting.

use crate::catalog::response::SearchOutcome;
use crate::domain::Book;

/// Debounce quiet period in seconds.
pub const DEBOUNCE_SECONDS: f64 = 1.0;

/// How a search dispatch request resolved.
///
/// Returned by [`SearchSession::begin_search`] so the caller knows whether a
/// fetch actually needs to go out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDispatch {
    /// A fetch should be issued for this query and page.
    Fetch {
        /// Query text to search for.
        query: String,
        /// 1-based page to fetch.
        page: u32,
    },

    /// The trimmed query was empty: the result list was cleared immediately
    /// and no fetch goes out.
    Cleared,

    /// A "load more" fetch is in flight; the search was ignored.
    Suppressed,
}

/// State for one search interaction lifecycle.
///
/// # Examples
///
/// ```
/// use zibrary::app::search::{SearchSession, SearchDispatch};
///
/// let mut session = SearchSession::new();
/// session.on_query_changed("harry potter");
/// assert!(matches!(
///     session.begin_search(1),
///     SearchDispatch::Fetch { page: 1, .. }
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Current query text as typed by the user.
    pub query: String,

    /// Accumulated results; insertion order is pagination order.
    pub results: Vec<Book>,

    /// Current 1-based page. Increases while paginating forward, rolls back
    /// by one when a "load more" fetch settles empty.
    pub page: u32,

    /// True while a first-page fetch is in flight.
    pub loading: bool,

    /// True while a subsequent-page fetch is in flight. While set, new
    /// searches are suppressed.
    pub loading_more: bool,

    /// Debounce generation counter. Each keystroke bumps it; only the timer
    /// carrying the newest generation triggers a search.
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    /// Creates an idle session with an empty query and page 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            loading: false,
            loading_more: false,
            generation: 0,
        }
    }

    /// Records a new query and arms a fresh debounce generation.
    ///
    /// Resets the page to 1 and returns the generation the runtime should
    /// schedule a timer for. Any previously scheduled timer becomes stale: its
    /// generation no longer matches and [`debounce_is_current`] rejects it.
    ///
    /// [`debounce_is_current`]: Self::debounce_is_current
    pub fn on_query_changed(&mut self, text: &str) -> u64 {
        self.query = text.to_string();
        self.page = 1;
        self.generation = self.generation.wrapping_add(1);

        tracing::trace!(
            query = %self.query,
            generation = self.generation,
            "query changed, debounce rearmed"
        );

        self.generation
    }

    /// Returns true if the given debounce generation is still the newest.
    #[must_use]
    pub fn debounce_is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Bumps the generation without touching the query.
    ///
    /// Used by the manual search trigger to invalidate any pending debounce
    /// timer before searching immediately.
    pub fn cancel_pending_debounce(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Decides whether a search for the given page should go out.
    ///
    /// Mirrors the search entry policy: a "load more" fetch in flight
    /// suppresses the call entirely; an empty trimmed query clears the result
    /// list immediately with no fetch; otherwise the loading flag is raised
    /// and a fetch for `(page-1) * 10` is requested.
    pub fn begin_search(&mut self, page: u32) -> SearchDispatch {
        if self.loading_more {
            tracing::debug!("search suppressed, load-more fetch in flight");
            return SearchDispatch::Suppressed;
        }

        self.loading = true;

        if self.query.trim().is_empty() {
            tracing::debug!("empty query, clearing results without fetch");
            self.results.clear();
            self.loading = false;
            return SearchDispatch::Cleared;
        }

        tracing::debug!(query = %self.query, page = page, "dispatching search fetch");
        SearchDispatch::Fetch {
            query: self.query.clone(),
            page,
        }
    }

    /// Requests the next page when navigation nears the end of the list.
    ///
    /// No-op while a "load more" fetch is already in flight or when there are
    /// no results to extend. Otherwise raises both loading flags, increments
    /// the page, and returns the fetch to issue.
    pub fn load_next_page(&mut self) -> Option<SearchDispatch> {
        if self.loading_more || self.results.is_empty() {
            return None;
        }

        self.loading_more = true;
        self.loading = true;
        self.page += 1;

        tracing::debug!(query = %self.query, page = self.page, "dispatching load-more fetch");
        Some(SearchDispatch::Fetch {
            query: self.query.clone(),
            page: self.page,
        })
    }

    /// Applies a settled fetch to the result list.
    ///
    /// Completion policy:
    /// - page 1 with items: the list is replaced wholesale
    /// - page 1 without items: the list is cleared
    /// - page > 1 with items: items are appended, prior order preserved
    /// - page > 1 without items: the page counter rolls back by one and the
    ///   list is untouched
    /// - failed fetch: no list mutation at all
    ///
    /// Both loading flags are cleared regardless of outcome. Returns true if
    /// the result list was replaced (the caller resets per-card UI state on
    /// replacement).
    pub fn settle(&mut self, page: u32, outcome: &SearchOutcome) -> bool {
        let replaced = match outcome {
            SearchOutcome::Items(items) => {
                if page == 1 {
                    tracing::debug!(item_count = items.len(), "first page settled, replacing results");
                    self.results = items.clone();
                    true
                } else {
                    tracing::debug!(item_count = items.len(), page = page, "page settled, appending results");
                    self.results.extend(items.iter().cloned());
                    false
                }
            }
            SearchOutcome::Empty => {
                if page == 1 {
                    tracing::debug!("first page settled empty, clearing results");
                    self.results.clear();
                    true
                } else {
                    tracing::debug!(page = page, "load-more settled empty, rolling page back");
                    self.page = self.page.saturating_sub(1);
                    false
                }
            }
            SearchOutcome::Failed => {
                tracing::debug!(page = page, "fetch failed, ignoring");
                false
            }
        };

        self.loading = false;
        self.loading_more = false;

        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books(ids: &[&str]) -> Vec<Book> {
        ids.iter().map(|id| Book::new(*id, format!("Book {id}"))).collect()
    }

    #[test]
    fn new_session_is_idle_on_page_one() {
        let session = SearchSession::new();
        assert_eq!(session.page, 1);
        assert!(!session.loading);
        assert!(!session.loading_more);
        assert!(session.results.is_empty());
    }

    #[test]
    fn query_change_resets_page_and_bumps_generation() {
        let mut session = SearchSession::new();
        session.page = 4;

        let first = session.on_query_changed("du");
        let second = session.on_query_changed("dun");

        assert_eq!(session.page, 1);
        assert_eq!(session.query, "dun");
        assert!(!session.debounce_is_current(first));
        assert!(session.debounce_is_current(second));
    }

    #[test]
    fn only_last_of_rapid_keystrokes_survives_debounce() {
        let mut session = SearchSession::new();

        let generations: Vec<u64> = ["h", "ha", "har", "harry"]
            .iter()
            .map(|text| session.on_query_changed(text))
            .collect();

        let current: Vec<bool> = generations
            .iter()
            .map(|g| session.debounce_is_current(*g))
            .collect();
        assert_eq!(current, vec![false, false, false, true]);
        assert_eq!(session.query, "harry");
    }

    #[test]
    fn empty_query_clears_immediately_without_fetch() {
        let mut session = SearchSession::new();
        session.results = books(&["1", "2"]);
        session.on_query_changed("   ");

        assert_eq!(session.begin_search(1), SearchDispatch::Cleared);
        assert!(session.results.is_empty());
        assert!(!session.loading);
    }

    #[test]
    fn search_is_suppressed_while_loading_more() {
        let mut session = SearchSession::new();
        session.on_query_changed("dune");
        session.loading_more = true;

        assert_eq!(session.begin_search(1), SearchDispatch::Suppressed);
    }

    #[test]
    fn first_page_replaces_results_wholesale() {
        let mut session = SearchSession::new();
        session.on_query_changed("harry potter");
        session.results = books(&["old"]);

        let replaced = session.settle(1, &SearchOutcome::Items(books(&["hp1", "hp2"])));

        assert!(replaced);
        let ids: Vec<&str> = session.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["hp1", "hp2"]);
        assert!(!session.loading);
    }

    #[test]
    fn empty_first_page_clears_results() {
        let mut session = SearchSession::new();
        session.results = books(&["old"]);

        session.settle(1, &SearchOutcome::Empty);

        assert!(session.results.is_empty());
    }

    #[test]
    fn later_pages_append_preserving_order() {
        let mut session = SearchSession::new();
        session.results = books(&["1", "2"]);

        session.settle(2, &SearchOutcome::Items(books(&["3", "4"])));

        let ids: Vec<&str> = session.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn empty_load_more_rolls_page_back_and_keeps_results() {
        let mut session = SearchSession::new();
        session.on_query_changed("dune");
        session.results = books(&["1", "2"]);

        let dispatch = session.load_next_page();
        assert!(matches!(dispatch, Some(SearchDispatch::Fetch { page: 2, .. })));
        assert_eq!(session.page, 2);

        session.settle(2, &SearchOutcome::Empty);

        assert_eq!(session.page, 1);
        assert_eq!(session.results.len(), 2);
        assert!(!session.loading_more);
    }

    #[test]
    fn failed_fetch_mutates_nothing_but_clears_flags() {
        let mut session = SearchSession::new();
        session.results = books(&["1"]);
        session.loading = true;
        session.loading_more = true;

        session.settle(2, &SearchOutcome::Failed);

        assert_eq!(session.results.len(), 1);
        assert_eq!(session.page, 1);
        assert!(!session.loading);
        assert!(!session.loading_more);
    }

    #[test]
    fn load_next_page_is_noop_without_results() {
        let mut session = SearchSession::new();
        session.on_query_changed("dune");

        assert!(session.load_next_page().is_none());
        assert_eq!(session.page, 1);
        assert!(!session.loading_more);
    }

    #[test]
    fn load_next_page_is_noop_while_already_loading_more() {
        let mut session = SearchSession::new();
        session.on_query_changed("dune");
        session.results = books(&["1"]);

        assert!(session.load_next_page().is_some());
        assert!(session.load_next_page().is_none());
        assert_eq!(session.page, 2);
    }

    #[test]
    fn manual_cancel_invalidates_pending_debounce() {
        let mut session = SearchSession::new();
        let generation = session.on_query_changed("dune");

        session.cancel_pending_debounce();

        assert!(!session.debounce_is_current(generation));
    }
}
