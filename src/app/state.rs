//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It composes the [`SearchSession`] (query, results, pagination) with the
//! favorites shelf, selection and expansion state, interaction modes, and the
//! live notice. It is the single source of truth for all transient UI state.
//!
//! # State Components
//!
//! - **Search session**: query text, accumulated results, loading flags
//! - **Favorites**: the persisted shelf, mirrored from the worker
//! - **Filtered favorites**: shelf subset after local fuzzy filtering
//! - **Selection / expansion**: cursor position and per-card detail toggles
//! - **Modes**: input mode, view mode, live notice
//!
//! # View Model Computation
//!
//! `compute_viewmodel` transforms a state snapshot into a renderable UI
//! representation, handling card windowing (expanded cards occupy more rows),
//! fuzzy match highlighting on the shelf, and empty state selection.

use super::modes::{InputMode, Notice, SearchFocus, ViewMode};
use crate::app::search::SearchSession;
use crate::domain::Book;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardDetail, CardView, EmptyState, FooterInfo, HeaderInfo, NoticeView, SearchBarInfo,
    UiViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// How close to the end of the results list the cursor may get before the next
/// page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 2;

/// Central application state container.
///
/// Mutated by the event handler in response to user input and system events.
/// View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search session: query, results, page, loading flags, debounce.
    pub search: SearchSession,

    /// Favorites shelf in shelving order, mirrored from the worker.
    pub favorites: Vec<Book>,

    /// Shelf subset matching the current query (Favorites view only).
    ///
    /// Recomputed by `apply_favorites_filter()` after state changes.
    pub filtered_favorites: Vec<Book>,

    /// Zero-based cursor position within the currently visible list.
    pub selected_index: usize,

    /// Indices of cards whose detail panel is expanded.
    ///
    /// Keyed by position in the visible list; cleared whenever the list is
    /// replaced or the view switches, so recreated cards start collapsed.
    pub expanded: HashSet<usize>,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Which list is displayed.
    pub view_mode: ViewMode,

    /// Live modal notice, if any. Any key dismisses it.
    pub notice: Option<Notice>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state with the given theme.
    ///
    /// Starts in the Results view with search typing focus, so the plugin is
    /// ready for a query the moment it opens. The shelf is empty until the
    /// worker reports the persisted favorites.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            search: SearchSession::new(),
            favorites: Vec::new(),
            filtered_favorites: Vec::new(),
            selected_index: 0,
            expanded: HashSet::new(),
            input_mode: InputMode::Search(SearchFocus::Typing),
            view_mode: ViewMode::Results,
            notice: None,
            theme,
        }
    }

    /// Returns the list currently on screen.
    #[must_use]
    pub fn visible_books(&self) -> &[Book] {
        match self.view_mode {
            ViewMode::Results => &self.search.results,
            ViewMode::Favorites => &self.filtered_favorites,
        }
    }

    /// Moves the cursor down one position, wrapping to the top at the end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up one position, wrapping to the bottom at the start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns the book under the cursor, if any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.visible_books().get(self.selected_index)
    }

    /// True when the cursor is within the load-more threshold of the end of
    /// the results list.
    #[must_use]
    pub fn near_end_of_results(&self) -> bool {
        let len = self.search.results.len();
        len > 0 && self.selected_index + LOAD_MORE_THRESHOLD >= len.saturating_sub(1)
    }

    /// Toggles the detail panel of the card under the cursor.
    pub fn toggle_expanded(&mut self) {
        if self.visible_books().is_empty() {
            return;
        }
        if !self.expanded.remove(&self.selected_index) {
            self.expanded.insert(self.selected_index);
        }
    }

    /// Resets per-card UI state after the visible list was replaced.
    ///
    /// Replaced cards are new instances: detail panels collapse and the cursor
    /// returns to the top.
    pub fn on_list_replaced(&mut self) {
        self.expanded.clear();
        self.selected_index = 0;
    }

    /// Switches the visible list, remounting all cards.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        if self.view_mode == view_mode {
            return;
        }
        self.view_mode = view_mode;
        self.on_list_replaced();
        self.apply_favorites_filter();
    }

    /// Replaces the shelf mirror and refreshes the filtered view.
    pub fn set_favorites(&mut self, favorites: Vec<Book>) {
        self.favorites = favorites;
        self.apply_favorites_filter();
    }

    /// True if a book with this identifier is on the shelf.
    #[must_use]
    pub fn is_favorited(&self, id: &str) -> bool {
        self.favorites.iter().any(|book| book.id == id)
    }

    /// Applies the query as a local fuzzy filter over the favorites shelf.
    ///
    /// The query is split into lowercase whitespace tokens; a shelved book
    /// passes when every token fuzzy-matches its title. An empty query passes
    /// everything. The cursor is clamped to the filtered bounds.
    ///
    /// Only the Favorites view reads the filtered list; the Results view shows
    /// whatever the remote search returned.
    pub fn apply_favorites_filter(&mut self) {
        use fuzzy_matcher::FuzzyMatcher;

        let _span = tracing::debug_span!("apply_favorites_filter",
            shelf_size = self.favorites.len(),
            query_len = self.search.query.len()
        )
        .entered();

        let tokens: Vec<String> = self
            .search
            .query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if tokens.is_empty() {
            self.filtered_favorites = self.favorites.clone();
        } else {
            let matcher = SkimMatcherV2::default();
            self.filtered_favorites = self
                .favorites
                .iter()
                .filter(|book| {
                    let title_lower = book.title.to_lowercase();
                    tokens
                        .iter()
                        .all(|token| matcher.fuzzy_match(&title_lower, token).is_some())
                })
                .cloned()
                .collect();
        }

        self.clamp_selection();

        tracing::debug!(
            filtered_count = self.filtered_favorites.len(),
            "favorites filter applied"
        );
    }

    /// Clamps the cursor to the bounds of the visible list.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Computes a renderable view model from current state and terminal size.
    ///
    /// Builds one card view per visible book, windows them around the cursor
    /// (expanded cards occupy more rows than collapsed ones), and attaches
    /// header, footer, search bar, empty state, and notice information.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UiViewModel {
        let cards = self.compute_cards(cols);
        let available_rows = self.calculate_available_rows(rows);
        let (start, end) = Self::visible_window(&cards, self.selected_index, available_rows);

        UiViewModel {
            cards: cards[start..end].to_vec(),
            header: self.compute_header(),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            empty_state: self.compute_empty_state(),
            notice: self.notice.map(|notice| NoticeView {
                title: notice.title().to_string(),
                body: notice.body().to_string(),
            }),
            loading_more: self.search.loading_more,
        }
    }

    /// Builds the full card list before windowing.
    fn compute_cards(&self, cols: usize) -> Vec<CardView> {
        use fuzzy_matcher::FuzzyMatcher;

        let highlight_matcher = if self.view_mode == ViewMode::Favorites
            && !self.search.query.is_empty()
        {
            Some(SkimMatcherV2::default())
        } else {
            None
        };

        self.visible_books()
            .iter()
            .enumerate()
            .map(|(index, book)| {
                let expanded = self.expanded.contains(&index);
                let detail = expanded.then(|| CardDetail {
                    // Absent fields render as empty values on purpose; the
                    // card shows all three lines whenever it is expanded.
                    description: book.description.clone().unwrap_or_default(),
                    published_date: book.published_date.clone().unwrap_or_default(),
                    publisher: book.publisher.clone().unwrap_or_default(),
                });

                let highlight_ranges = highlight_matcher
                    .as_ref()
                    .and_then(|matcher| {
                        matcher
                            .fuzzy_indices(&book.title, &self.search.query)
                            .map(|(_score, indices)| Self::coalesce_indices(&indices))
                    })
                    .unwrap_or_default();

                let max_title = cols.saturating_sub(8);
                let title = if book.title.chars().count() > max_title && max_title > 3 {
                    let truncated: String = book.title.chars().take(max_title - 3).collect();
                    format!("{truncated}...")
                } else {
                    book.title.clone()
                };

                CardView {
                    title,
                    has_thumbnail: book.thumbnail.is_some(),
                    expanded,
                    detail,
                    is_selected: index == self.selected_index,
                    is_favorited: self.is_favorited(&book.id),
                    can_add: self.view_mode == ViewMode::Results,
                    can_remove: self.view_mode == ViewMode::Favorites,
                    highlight_ranges,
                }
            })
            .collect()
    }

    /// Coalesces consecutive match indices into `(start, end)` ranges.
    fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        ranges
    }

    /// Grows a window of cards around the cursor until the row budget is spent.
    ///
    /// Expanded cards cost more rows than collapsed ones, so the window is
    /// measured in rendered rows, not card counts. The selected card is always
    /// included.
    fn visible_window(cards: &[CardView], selected: usize, available_rows: usize) -> (usize, usize) {
        if cards.is_empty() {
            return (0, 0);
        }

        let selected = selected.min(cards.len() - 1);
        let mut start = selected;
        let mut end = selected + 1;
        let mut used = cards[selected].height();

        loop {
            let mut grew = false;

            if end < cards.len() && used + cards[end].height() <= available_rows {
                used += cards[end].height();
                end += 1;
                grew = true;
            }

            if start > 0 && used + cards[start - 1].height() <= available_rows {
                start -= 1;
                used += cards[start].height();
                grew = true;
            }

            if !grew {
                break;
            }
        }

        (start, end)
    }

    /// Computes header information for the current view.
    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Results => {
                if self.search.loading && !self.search.loading_more {
                    " Books · searching... ".to_string()
                } else {
                    format!(" Books ({}) ", self.search.results.len())
                }
            }
            ViewMode::Favorites => format!(" Favorites ({}) ", self.filtered_favorites.len()),
        };
        HeaderInfo { title }
    }

    /// Computes footer keybinding hints for the current mode combination.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_mode) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: exit search  Enter: search now  Tab: results  Type to search".to_string()
            }
            (InputMode::Search(SearchFocus::Navigating), ViewMode::Results) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: details  a: favorite"
                    .to_string()
            }
            (InputMode::Search(SearchFocus::Navigating), ViewMode::Favorites) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: details  x: remove"
                    .to_string()
            }
            (InputMode::Normal, ViewMode::Results) => {
                "j/k: navigate  /: search  Enter: details  a: favorite  Tab: favorites  q: quit"
                    .to_string()
            }
            (InputMode::Normal, ViewMode::Favorites) => {
                "j/k: navigate  /: filter  Enter: details  x: remove  Tab: books  q: quit"
                    .to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Computes search bar state if in search mode.
    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search.query.clone(),
                typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    /// Computes the empty state message when the visible list has no cards.
    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible_books().is_empty() || self.search.loading {
            return None;
        }

        let (message, subtitle) = match self.view_mode {
            ViewMode::Results => ("No item Found", "Search the catalog to see books here"),
            ViewMode::Favorites => ("Add Books to Favorite", "Favorites you add appear here"),
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    /// Calculates rows available for cards after subtracting UI chrome.
    ///
    /// Chrome is the blank top line, header, borders, and footer (6 rows), the
    /// search bar (3 more rows in search mode), and the load-more indicator
    /// line when a pagination fetch is in flight.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let chrome = match self.input_mode {
            InputMode::Normal => 6,
            InputMode::Search(_) => 9,
        };
        let indicator = if self.search.loading_more { 1 } else { 0 };
        total_rows.saturating_sub(chrome + indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_favorites(titles: &[(&str, &str)]) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.set_favorites(
            titles
                .iter()
                .map(|(id, title)| Book::new(*id, *title))
                .collect(),
        );
        state
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = AppState::new(Theme::default());
        state.search.results = vec![Book::new("1", "A"), Book::new("2", "B")];

        state.move_selection_down();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn favorites_filter_requires_all_tokens() {
        let mut state = state_with_favorites(&[
            ("1", "The Name of the Wind"),
            ("2", "The Wise Man's Fear"),
            ("3", "Words of Radiance"),
        ]);

        state.search.query = "wi fe".to_string();
        state.apply_favorites_filter();

        assert_eq!(state.filtered_favorites.len(), 1);
        assert_eq!(state.filtered_favorites[0].id, "2");
    }

    #[test]
    fn empty_query_passes_whole_shelf() {
        let mut state = state_with_favorites(&[("1", "A"), ("2", "B")]);
        state.search.query = String::new();
        state.apply_favorites_filter();
        assert_eq!(state.filtered_favorites.len(), 2);
    }

    #[test]
    fn filter_clamps_selection() {
        let mut state = state_with_favorites(&[("1", "Dune"), ("2", "Hyperion")]);
        state.set_view_mode(ViewMode::Favorites);
        state.selected_index = 1;

        state.search.query = "dune".to_string();
        state.apply_favorites_filter();

        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn toggle_expanded_flips_per_card() {
        let mut state = AppState::new(Theme::default());
        state.search.results = vec![Book::new("1", "A"), Book::new("2", "B")];

        state.toggle_expanded();
        assert!(state.expanded.contains(&0));
        state.toggle_expanded();
        assert!(!state.expanded.contains(&0));
    }

    #[test]
    fn list_replacement_collapses_cards_and_resets_cursor() {
        let mut state = AppState::new(Theme::default());
        state.search.results = vec![Book::new("1", "A"), Book::new("2", "B")];
        state.selected_index = 1;
        state.toggle_expanded();

        state.on_list_replaced();

        assert!(state.expanded.is_empty());
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn near_end_detection_respects_threshold() {
        let mut state = AppState::new(Theme::default());
        state.search.results = (0..10)
            .map(|i| Book::new(i.to_string(), format!("Book {i}")))
            .collect();

        state.selected_index = 5;
        assert!(!state.near_end_of_results());

        state.selected_index = 7;
        assert!(state.near_end_of_results());
    }

    #[test]
    fn results_cards_offer_add_and_mark_shelved_books() {
        let mut state = AppState::new(Theme::default());
        state.search.results = vec![Book::new("1", "Dune"), Book::new("2", "Hyperion")];
        state.set_favorites(vec![Book::new("1", "Dune")]);

        let vm = state.compute_viewmodel(30, 80);

        assert!(vm.cards[0].can_add);
        assert!(!vm.cards[0].can_remove);
        assert!(vm.cards[0].is_favorited);
        assert!(!vm.cards[1].is_favorited);
    }

    #[test]
    fn expanded_card_renders_absent_fields_as_empty() {
        let mut state = AppState::new(Theme::default());
        state.search.results = vec![Book::new("1", "Dune")];
        state.toggle_expanded();

        let vm = state.compute_viewmodel(30, 80);

        let detail = vm.cards[0].detail.as_ref().unwrap();
        assert_eq!(detail.description, "");
        assert_eq!(detail.published_date, "");
        assert_eq!(detail.publisher, "");
    }

    #[test]
    fn empty_results_produce_no_item_found() {
        let state = AppState::new(Theme::default());
        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No item Found");
    }

    #[test]
    fn empty_favorites_produce_shelf_prompt() {
        let mut state = AppState::new(Theme::default());
        state.set_view_mode(ViewMode::Favorites);
        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Add Books to Favorite");
    }

    #[test]
    fn window_always_contains_selected_card() {
        let mut state = AppState::new(Theme::default());
        state.search.results = (0..50)
            .map(|i| Book::new(i.to_string(), format!("Book {i}")))
            .collect();
        state.selected_index = 42;

        let vm = state.compute_viewmodel(20, 80);

        assert!(vm.cards.iter().any(|card| card.is_selected));
    }
}
