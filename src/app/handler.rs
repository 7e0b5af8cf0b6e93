//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer and web request results, and worker responses, translating them into
//! state changes and action sequences. It is the primary control flow
//! coordinator for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `SearchSession` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Categories
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `ToggleExpand`
//! - **Query input**: `Char`, `Backspace`, `SubmitSearch`
//! - **Mode switching**: `SearchMode`, `FocusResults`, `ShowFavorites`, ...
//! - **Favorites**: `AddSelectedToFavorites`, `RemoveSelectedFromFavorites`
//! - **System**: `DebounceElapsed`, `FetchSettled`, `WorkerResponse`,
//!   `PermissionsResult`
//!
//! A live notice swallows the next user input event: the key dismisses the
//! notice and does nothing else. System events pass through unaffected.

use crate::app::search::SearchDispatch;
use crate::app::{Action, AppState};
use crate::catalog::response::SearchOutcome;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use zellij_tile::prelude::PermissionType;

use super::modes::{InputMode, Notice, SearchFocus, ViewMode};

/// Events triggered by user input, system changes, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down one card (wraps to top). Nearing the end of the
    /// results list triggers pagination.
    KeyDown,
    /// Moves the cursor up one card (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Expands or collapses the detail panel of the card under the cursor.
    ToggleExpand,
    /// Adds the book under the cursor to the favorites shelf (Results view).
    AddSelectedToFavorites,
    /// Removes the book under the cursor from the shelf (Favorites view).
    RemoveSelectedFromFavorites,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating focus).
    FocusSearchBar,
    /// Focuses the list below the search bar (from typing focus).
    FocusResults,
    /// Exits search mode, leaving query and results as they are.
    ExitSearch,
    /// Appends a character to the query. Reschedules the debounce in the
    /// Results view, refilters the shelf in the Favorites view.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Leaves search mode / dismisses transient UI.
    Escape,
    /// Manual search trigger: resets to page 1 and searches immediately,
    /// superseding any pending debounce.
    SubmitSearch,
    /// Switches to the remote results view.
    ShowResults,
    /// Switches to the favorites shelf view.
    ShowFavorites,
    /// Dismisses the live notice, if any.
    DismissNotice,

    /// The debounce timer for the given generation fired.
    ///
    /// Only the newest generation triggers a search; anything else is a
    /// cancelled timer and is discarded.
    DebounceElapsed {
        /// Generation the timer was armed for.
        generation: u64,
    },

    /// A catalog fetch settled (successfully or not).
    FetchSettled {
        /// 1-based page the fetch was issued for.
        page: u32,
        /// Parsed outcome of the fetch.
        outcome: SearchOutcome,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// Reports granted Zellij permissions after a permission request.
    ///
    /// The runtime layer reacts to this (kicking off the initial favorites
    /// load); the state machine itself has nothing to do.
    PermissionsResult {
        /// Permissions granted by the user.
        granted: Vec<PermissionType>,
    },
}

impl Event {
    /// True for events produced directly by a key press.
    ///
    /// These are the events a live notice swallows.
    const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::DebounceElapsed { .. }
                | Self::FetchSettled { .. }
                | Self::WorkerResponse(_)
                | Self::PermissionsResult { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions to be executed by the plugin runtime.
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI needs a repaint, plus the side
/// effects to execute in sequence.
///
/// # Errors
///
/// Returns errors from state mutation methods. In practice the state machine
/// is total and this is reserved for future fallible transitions.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    // A modal notice blocks the UI: the next key only dismisses it.
    if state.notice.is_some() && event.is_user_input() {
        tracing::debug!("dismissing notice");
        state.notice = None;
        return Ok((true, vec![]));
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();

            let mut actions = vec![];
            if state.view_mode == ViewMode::Results && state.near_end_of_results() {
                if let Some(SearchDispatch::Fetch { query, page }) = state.search.load_next_page()
                {
                    actions.push(Action::FetchPage { query, page });
                }
            }

            Ok((true, actions))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::ToggleExpand => {
            state.toggle_expanded();
            Ok((true, vec![]))
        }
        Event::AddSelectedToFavorites => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }

            state.selected_book().map_or_else(
                || {
                    tracing::debug!("no book selected to add");
                    Ok((false, vec![]))
                },
                |book| {
                    tracing::debug!(book_id = %book.id, "adding book to favorites");
                    Ok((
                        false,
                        vec![Action::PostToWorker(WorkerMessage::add_favorite(
                            book.clone(),
                        ))],
                    ))
                },
            )
        }
        Event::RemoveSelectedFromFavorites => {
            if state.view_mode != ViewMode::Favorites {
                return Ok((false, vec![]));
            }

            state.selected_book().map_or_else(
                || {
                    tracing::debug!("no book selected to remove");
                    Ok((false, vec![]))
                },
                |book| {
                    tracing::debug!(book_id = %book.id, "removing book from favorites");
                    Ok((
                        false,
                        vec![Action::PostToWorker(WorkerMessage::remove_favorite(
                            book.id.clone(),
                        ))],
                    ))
                },
            )
        }
        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search.query.is_empty() {
                state.input_mode = InputMode::Normal;
            } else {
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
            }
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search.query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }

            let mut text = state.search.query.clone();
            text.push(*c);
            Ok((true, query_changed(state, &text)))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(SearchFocus::Typing)) {
                return Ok((false, vec![]));
            }

            let mut text = state.search.query.clone();
            if text.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, query_changed(state, &text)))
        }
        Event::Escape => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            if state.view_mode == ViewMode::Favorites {
                state.apply_favorites_filter();
                state.input_mode = InputMode::Search(SearchFocus::Navigating);
                return Ok((true, vec![]));
            }

            tracing::debug!(query = %state.search.query, "manual search submitted");
            state.search.cancel_pending_debounce();
            state.search.page = 1;
            state.input_mode = InputMode::Search(SearchFocus::Navigating);

            let actions = match state.search.begin_search(1) {
                SearchDispatch::Fetch { query, page } => vec![Action::FetchPage { query, page }],
                SearchDispatch::Cleared | SearchDispatch::Suppressed => vec![],
            };
            Ok((true, actions))
        }
        Event::ShowResults => {
            state.set_view_mode(ViewMode::Results);
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.set_view_mode(ViewMode::Favorites);
            Ok((true, vec![]))
        }
        Event::DismissNotice => {
            state.notice = None;
            Ok((true, vec![]))
        }
        Event::DebounceElapsed { generation } => {
            if !state.search.debounce_is_current(*generation) {
                tracing::trace!(generation = generation, "stale debounce timer, discarding");
                return Ok((false, vec![]));
            }

            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }

            let actions = match state.search.begin_search(1) {
                SearchDispatch::Fetch { query, page } => vec![Action::FetchPage { query, page }],
                SearchDispatch::Cleared | SearchDispatch::Suppressed => vec![],
            };
            Ok((true, actions))
        }
        Event::FetchSettled { page, outcome } => {
            let replaced = state.search.settle(*page, outcome);
            if replaced && state.view_mode == ViewMode::Results {
                state.on_list_replaced();
            }
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::FavoritesLoaded { favorites } => {
                tracing::debug!(favorite_count = favorites.len(), "favorites loaded");
                state.set_favorites(favorites.clone());
                Ok((true, vec![]))
            }
            WorkerResponse::FavoriteAdded { favorites } => {
                state.set_favorites(favorites.clone());
                state.notice = Some(Notice::Added);
                Ok((true, vec![]))
            }
            WorkerResponse::AlreadyFavorite { id } => {
                tracing::debug!(book_id = %id, "book already shelved");
                state.notice = Some(Notice::AlreadyInFavorites);
                Ok((true, vec![]))
            }
            WorkerResponse::FavoriteRemoved { id, favorites } => {
                tracing::debug!(book_id = %id, "favorite removal settled");
                state.set_favorites(favorites.clone());
                state.notice = Some(Notice::Removed);
                Ok((true, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((false, vec![]))
            }
        },
        Event::PermissionsResult { granted: _ } => Ok((false, vec![])),
    }
}

/// Applies a query edit: records the text, rearms the debounce, and refilters
/// or reschedules depending on the active view.
fn query_changed(state: &mut AppState, text: &str) -> Vec<Action> {
    let generation = state.search.on_query_changed(text);

    match state.view_mode {
        ViewMode::Results => vec![Action::ScheduleDebounce { generation }],
        ViewMode::Favorites => {
            state.apply_favorites_filter();
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;
    use crate::ui::theme::Theme;

    fn new_state() -> AppState {
        AppState::new(Theme::default())
    }

    fn books(ids: &[&str]) -> Vec<Book> {
        ids.iter().map(|id| Book::new(*id, format!("Book {id}"))).collect()
    }

    fn type_query(state: &mut AppState, text: &str) -> Vec<Action> {
        let mut last = vec![];
        for c in text.chars() {
            let (_, actions) = handle_event(state, &Event::Char(c)).unwrap();
            last = actions;
        }
        last
    }

    #[test]
    fn rapid_keystrokes_produce_one_fetch_for_final_text() {
        let mut state = new_state();

        // Each keystroke schedules a debounce for a newer generation.
        type_query(&mut state, "harr");
        let actions = type_query(&mut state, "y");
        let Action::ScheduleDebounce { generation: last } = actions[0] else {
            panic!("expected debounce scheduling");
        };

        // A stale timer is discarded without a fetch.
        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { generation: last - 1 }).unwrap();
        assert!(actions.is_empty());

        // Only the newest generation dispatches, for the final text.
        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { generation: last }).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchPage {
                query: "harry".to_string(),
                page: 1
            }]
        );
        assert!(state.search.loading);
    }

    #[test]
    fn first_page_response_replaces_results() {
        let mut state = new_state();
        let actions = type_query(&mut state, "harry potter");
        let Action::ScheduleDebounce { generation } = actions[0] else {
            panic!("expected debounce scheduling");
        };
        handle_event(&mut state, &Event::DebounceElapsed { generation }).unwrap();

        handle_event(
            &mut state,
            &Event::FetchSettled {
                page: 1,
                outcome: SearchOutcome::Items(books(&["hp1", "hp2"])),
            },
        )
        .unwrap();

        let ids: Vec<&str> = state.search.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["hp1", "hp2"]);
        assert!(!state.search.loading);
    }

    #[test]
    fn clearing_the_query_empties_results_without_fetch() {
        let mut state = new_state();
        state.search.results = books(&["1"]);
        type_query(&mut state, "x");
        let actions = handle_event(&mut state, &Event::Backspace).unwrap().1;
        let Action::ScheduleDebounce { generation } = actions[0] else {
            panic!("expected debounce scheduling");
        };

        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { generation }).unwrap();

        assert!(actions.is_empty());
        assert!(state.search.results.is_empty());
    }

    #[test]
    fn navigating_near_end_requests_next_page_once() {
        let mut state = new_state();
        state.input_mode = InputMode::Normal;
        state.search.query = "dune".to_string();
        state.search.results = books(&["0", "1", "2", "3", "4"]);
        state.selected_index = 2;

        let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchPage {
                query: "dune".to_string(),
                page: 2
            }]
        );
        assert!(state.search.loading_more);

        // Guard: no second fetch while the first is in flight.
        let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn new_search_is_suppressed_while_loading_more() {
        let mut state = new_state();
        state.search.results = books(&["1"]);
        state.search.loading_more = true;

        let actions = type_query(&mut state, "q");
        let Action::ScheduleDebounce { generation } = actions[0] else {
            panic!("expected debounce scheduling");
        };
        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { generation }).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.search.results.len(), 1);
    }

    #[test]
    fn submit_searches_immediately_and_invalidates_debounce() {
        let mut state = new_state();
        let actions = type_query(&mut state, "dune");
        let Action::ScheduleDebounce { generation } = actions[0] else {
            panic!("expected debounce scheduling");
        };

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchPage {
                query: "dune".to_string(),
                page: 1
            }]
        );

        // The pending debounce timer is now stale.
        let (_, actions) =
            handle_event(&mut state, &Event::DebounceElapsed { generation }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn add_favorite_posts_worker_message() {
        let mut state = new_state();
        state.input_mode = InputMode::Normal;
        state.search.results = books(&["1"]);

        let (_, actions) = handle_event(&mut state, &Event::AddSelectedToFavorites).unwrap();

        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::AddFavorite { book, .. }) if book.id == "1"
        ));
    }

    #[test]
    fn remove_favorite_posts_worker_message_in_favorites_view() {
        let mut state = new_state();
        state.input_mode = InputMode::Normal;
        state.set_favorites(books(&["1"]));
        state.set_view_mode(ViewMode::Favorites);

        let (_, actions) =
            handle_event(&mut state, &Event::RemoveSelectedFromFavorites).unwrap();

        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::RemoveFavorite { id, .. }) if id == "1"
        ));
    }

    #[test]
    fn worker_responses_set_notices() {
        let mut state = new_state();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FavoriteAdded {
                favorites: books(&["1"]),
            }),
        )
        .unwrap();
        assert_eq!(state.notice, Some(Notice::Added));
        assert_eq!(state.favorites.len(), 1);

        state.notice = None;
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AlreadyFavorite {
                id: "1".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(state.notice, Some(Notice::AlreadyInFavorites));
    }

    #[test]
    fn removal_notice_shows_even_when_nothing_was_removed() {
        let mut state = new_state();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FavoriteRemoved {
                id: "ghost".to_string(),
                favorites: vec![],
            }),
        )
        .unwrap();

        assert_eq!(state.notice, Some(Notice::Removed));
    }

    #[test]
    fn any_key_dismisses_notice_and_does_nothing_else() {
        let mut state = new_state();
        state.input_mode = InputMode::Normal;
        state.search.results = books(&["1", "2"]);
        state.notice = Some(Notice::Added);

        let (rendered, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();

        assert!(rendered);
        assert!(actions.is_empty());
        assert!(state.notice.is_none());
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn system_events_pass_through_a_live_notice() {
        let mut state = new_state();
        state.notice = Some(Notice::Added);
        state.search.loading = true;

        handle_event(
            &mut state,
            &Event::FetchSettled {
                page: 1,
                outcome: SearchOutcome::Items(books(&["1"])),
            },
        )
        .unwrap();

        assert_eq!(state.notice, Some(Notice::Added));
        assert_eq!(state.search.results.len(), 1);
    }

    #[test]
    fn typing_in_favorites_view_filters_locally_without_fetch() {
        let mut state = new_state();
        state.set_favorites(vec![
            Book::new("1", "Dune"),
            Book::new("2", "Hyperion"),
        ]);
        state.set_view_mode(ViewMode::Favorites);
        state.input_mode = InputMode::Search(SearchFocus::Typing);

        let actions = type_query(&mut state, "dune");

        assert!(actions.is_empty());
        assert_eq!(state.filtered_favorites.len(), 1);
        assert_eq!(state.filtered_favorites[0].id, "1");
    }

    #[test]
    fn later_settling_first_page_overwrites_earlier_one() {
        let mut state = new_state();

        handle_event(
            &mut state,
            &Event::FetchSettled {
                page: 1,
                outcome: SearchOutcome::Items(books(&["slow1", "slow2"])),
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::FetchSettled {
                page: 1,
                outcome: SearchOutcome::Items(books(&["fast1"])),
            },
        )
        .unwrap();

        let ids: Vec<&str> = state.search.results.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["fast1"]);
    }
}
