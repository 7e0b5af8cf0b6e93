//! Input, view, and notice state types for the application.
//!
//! This module defines the state machine enums that control user interaction
//! modes, which list is displayed, and the modal notices surfaced after
//! favorites operations.
//!
//! # State Machine
//!
//! The application operates in one of two primary input modes:
//! - **Normal**: Navigation and command mode
//! - **Search**: Active search with typing or result navigation focus
//!
//! View modes control which list is visible:
//! - **Results**: Remote catalog search results
//! - **Favorites**: The locally persisted shelf

/// Focus state within search mode.
///
/// Determines whether search input is being typed or the list is being
/// navigated. Controls which keybindings are active during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to submit the query
    /// immediately).
    Typing,

    /// User is navigating the list below the search bar.
    ///
    /// Accepts j/k for movement, enter to expand, and / to return to typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    ///
    /// Contains a [`SearchFocus`] variant indicating whether the user is
    /// typing or navigating the list.
    Search(SearchFocus),
}

/// Which list is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Remote catalog search results. Cards offer the add-to-favorites action.
    Results,

    /// The persisted favorites shelf. Cards offer the remove action, and the
    /// query filters the shelf locally instead of hitting the catalog.
    Favorites,
}

/// Modal notice shown after a favorites operation settles.
///
/// At most one notice is live at a time; any key dismisses it before normal
/// key handling resumes. The removal notice is shown whether or not the
/// targeted book was actually on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The book was added to the shelf.
    Added,

    /// The book was already on the shelf; nothing changed.
    AlreadyInFavorites,

    /// The removal settled.
    Removed,
}

impl Notice {
    /// Notice heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Added => "Added to Favorites",
            Self::AlreadyInFavorites => "Already in Favorites",
            Self::Removed => "Removed from Favorites",
        }
    }

    /// Notice body text.
    #[must_use]
    pub const fn body(self) -> &'static str {
        match self {
            Self::Added => "Book has been added to favorites.",
            Self::AlreadyInFavorites => "This book is already in favorites.",
            Self::Removed => "Book has been removed from favorites.",
        }
    }
}
