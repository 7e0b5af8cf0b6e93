//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer; they contain no business logic, only display-ready data like
//! pre-computed highlight ranges, card expansion, and selection state.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UiViewModel {
    /// Cards in the visible window, in list order.
    pub cards: Vec<CardView>,

    /// Header information (view title, counts, searching indicator).
    pub header: HeaderInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Search bar information (present while in search mode).
    pub search_bar: Option<SearchBarInfo>,

    /// Empty state message (present when the visible list has no cards).
    pub empty_state: Option<EmptyState>,

    /// Modal notice overlay (present after a favorites operation settled).
    pub notice: Option<NoticeView>,

    /// True while a pagination fetch is in flight; the renderer shows a
    /// trailing loading indicator below the cards.
    pub loading_more: bool,
}

/// Display information for a single book card.
///
/// A collapsed card renders on one row; an expanded card adds the three
/// detail rows; the selected card adds one action hint row per offered
/// capability.
#[derive(Debug, Clone)]
pub struct CardView {
    /// Title, truncated to the terminal width.
    pub title: String,

    /// Whether the book carries a thumbnail URI (rendered as a marker).
    pub has_thumbnail: bool,

    /// Whether the detail panel is open.
    pub expanded: bool,

    /// Detail rows; present exactly when `expanded` is true. Absent book
    /// fields appear as empty strings.
    pub detail: Option<CardDetail>,

    /// Whether this card is under the cursor.
    pub is_selected: bool,

    /// Whether this book is on the favorites shelf (shelf marker).
    pub is_favorited: bool,

    /// Whether the card offers the add-to-favorites action.
    pub can_add: bool,

    /// Whether the card offers the remove-from-favorites action.
    pub can_remove: bool,

    /// Character ranges of the title to highlight (shelf fuzzy matches).
    ///
    /// Each tuple is `(start, end)` in character indices, exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl CardView {
    /// Number of terminal rows this card occupies when rendered.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut rows = 1;
        if self.expanded {
            rows += 3;
        }
        if self.is_selected && (self.can_add || self.can_remove) {
            rows += 1;
        }
        rows
    }
}

/// Detail panel contents for an expanded card.
#[derive(Debug, Clone)]
pub struct CardDetail {
    /// Description line value (may be empty).
    pub description: String,

    /// Publication date line value (may be empty).
    pub published_date: String,

    /// Publisher line value (may be empty).
    pub publisher: String,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g. "No item Found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,

    /// Whether the input field has focus (renders a cursor block).
    pub typing: bool,
}

/// Modal notice display information.
#[derive(Debug, Clone)]
pub struct NoticeView {
    /// Notice heading.
    pub title: String,

    /// Notice body text.
    pub body: String,
}
