//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Zibrary library
//! and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Architecture
//!
//! The plugin uses Zellij's worker thread support for background storage:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling,
//! │  └──────────────────┘   │    timers, web requests
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  ZibraryWorker   │   │  ← Favorites blob I/O
//! │  │  (worker thread) │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `Timer`, `WebRequestResult`,
//!    `CustomMessage`, and `PermissionRequestResult` events
//! 3. **Permissions granted**: Post the initial `LoadFavorites` message
//! 4. **Update**: Translate Zellij events to library events, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Debounce Delivery
//!
//! Zellij timers carry no payload, so the shim keeps a FIFO of debounce
//! generations: executing `ScheduleDebounce` pushes the generation and arms
//! `set_timeout`; each `Timer` event pops the front and hands the generation
//! back to the library, which discards it if a newer keystroke arrived in the
//! meantime. Timers share one fixed duration, so they fire in push order.
//!
//! # Fetch Correlation
//!
//! `web_request` context maps carry the query and page of each catalog fetch;
//! the matching `WebRequestResult` event echoes them back, letting the library
//! apply the right completion policy without guessing.
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! While typing (search focus):
//! - printable keys: Edit the query (debounced search)
//! - `Enter`: Search immediately
//! - `Tab`: Jump to the list
//! - `Esc`: Leave search mode
//!
//! In normal mode / list focus:
//! - `j`/`Down`, `k`/`Up`: Navigate (nearing the end loads the next page)
//! - `Enter`: Expand/collapse the selected card
//! - `a`: Add the selected book to favorites
//! - `x`: Remove the selected favorite
//! - `Tab`: Toggle between Books and Favorites
//! - `/`: Focus the search input
//! - `q`: Close the plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zibrary::app::DEBOUNCE_SECONDS;
use zibrary::catalog::{parse_search_response, SearchRequest};
use zibrary::worker::{WorkerMessage, WorkerResponse, ZibraryWorker};
use zibrary::{handle_event, Action, Config, Event, InputMode, SearchFocus, ViewMode};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(ZibraryWorker, zibrary_worker, ZIBRARY_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: worker
/// addressing, the configured API base, and the debounce timer FIFO.
struct State {
    /// Core application state from the library layer.
    app: zibrary::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Configured volumes endpoint base.
    api_base: String,

    /// Generations of armed debounce timers, in firing order.
    debounce_queue: VecDeque<u64>,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: zibrary::initialize(&default_config),
            worker_name: "zibrary".to_string(),
            api_base: default_config.api_base,
            debounce_queue: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes application state and tracing,
    /// requests permissions, and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Issue catalog search requests
    /// - `FullHdAccess`: Read and write the favorites blob under `/host`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zibrary::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        tracing::debug!(api_base = %config.api_base, "parsed configuration");
        self.app = zibrary::initialize(&config);
        self.api_base.clone_from(&config.api_base);
        tracing::debug!("app state initialized");

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes the resulting actions. Returns `true` if
    /// the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => match self.debounce_queue.pop_front() {
                Some(generation) => Event::DebounceElapsed { generation },
                None => {
                    tracing::debug!("timer fired with no armed debounce");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI by delegating to the library's rendering layer.
    fn render(&mut self, rows: usize, cols: usize) {
        zibrary::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events based on the active mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Tab => Event::FocusResults,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter => Event::ToggleExpand,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Char('a') => Event::AddSelectedToFavorites,
                BareKey::Char('x') => Event::RemoveSelectedFromFavorites,
                BareKey::Tab => self.toggle_view_event(),
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Esc => Event::Escape,
                BareKey::Enter => Event::ToggleExpand,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('a') => Event::AddSelectedToFavorites,
                BareKey::Char('x') => Event::RemoveSelectedFromFavorites,
                BareKey::Tab => self.toggle_view_event(),
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Returns the event switching to the other list view.
    fn toggle_view_event(&self) -> Event {
        match self.app.view_mode {
            ViewMode::Results => Event::ShowFavorites,
            ViewMode::Favorites => Event::ShowResults,
        }
    }

    /// Maps a settled web request to a fetch event.
    ///
    /// Requests carry their query and page in the context map; anything
    /// without a recognizable catalog search context is ignored.
    fn map_web_request_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let request = SearchRequest::from_context(context)?;

        tracing::debug!(
            status = status,
            page = request.page,
            query = %request.query,
            "search fetch settled"
        );

        Some(Event::FetchSettled {
            page: request.page,
            outcome: parse_search_response(status, body),
        })
    }

    /// Handles permission request results.
    fn handle_permission_result(&self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading favorites");
                self.post_worker_message(&WorkerMessage::load_favorites());
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin functionality limited");
            }
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Close the plugin pane
    /// - `ScheduleDebounce`: Arm the debounce timer for a generation
    /// - `FetchPage`: Issue a catalog search via the host
    /// - `PostToWorker`: Send an IPC message to the worker thread
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ScheduleDebounce { generation } => {
                tracing::debug!(generation = generation, "arming debounce timer");
                self.debounce_queue.push_back(*generation);
                set_timeout(DEBOUNCE_SECONDS);
            }
            Action::FetchPage { ref query, page } => {
                let request = SearchRequest::new(query.clone(), *page);
                match request.to_url(&self.api_base) {
                    Ok(url) => {
                        tracing::debug!(url = %url, page = page, "issuing search fetch");
                        web_request(
                            url.to_string(),
                            HttpVerb::Get,
                            BTreeMap::new(),
                            Vec::new(),
                            request.to_context(),
                        );
                    }
                    Err(e) => {
                        // The config layer validates api_base, so this is a
                        // last-resort guard; settle the fetch as failed so the
                        // loading flags clear.
                        tracing::debug!(error = %e, "could not build search URL");
                        let _ = handle_event(
                            &mut self.app,
                            &Event::FetchSettled {
                                page: *page,
                                outcome: zibrary::SearchOutcome::Failed,
                            },
                        );
                    }
                }
            }
            Action::PostToWorker(ref message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                self.post_worker_message(message);
            }
        }
    }
}
