//! Zibrary: a Zellij plugin for searching a book catalog with a persisted
//! favorites shelf.
//!
//! Zibrary is a terminal multiplexer plugin that provides:
//! - Debounced, as-you-type search against the Google Books volumes endpoint
//! - Endless pagination: nearing the end of the list fetches the next page
//! - Expandable book cards showing description, publication date, and publisher
//! - A favorites shelf persisted as a JSON blob, deduplicated by book id
//! - Local fuzzy filtering of the shelf with match highlighting
//! - Asynchronous storage via a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key mapping, debounce timers, web requests       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Search session
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Request URL │   │ - Favorites   │
//! │ - Theming     │   │ - Response    │   │   storage I/O │
//! │ - Components  │   │   parsing     │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Favorites blob (storage/)                        │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Book model, error types (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Remote volumes endpoint access (request URLs, parsing)
//! - [`domain`]: Core domain types (Book, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: JSON blob persistence for the favorites shelf
//! - [`worker`]: Background worker for async favorites operations
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zibrary.wasm" {
//!         api_base "https://www.googleapis.com/books/v1/"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Data Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, subscribe to events, request permissions.
//! 2. **Typing**: each keystroke rearms a 1-second debounce timer; the timer
//!    that survives the quiet period triggers a page-1 fetch via the host.
//! 3. **Fetch Settling**: the host delivers status/body/context; page 1
//!    replaces the list, later pages append, an empty later page rolls the
//!    page counter back.
//! 4. **Favorites**: add/remove requests go to the worker thread, which owns
//!    the JSON blob and answers with the updated shelf; the UI then shows the
//!    matching notice.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use catalog::{SearchOutcome, SearchRequest};
pub use domain::{Book, Result, ZibraryError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/zibrary.wasm" {
///     api_base "https://www.googleapis.com/books/v1/"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the volumes search endpoint.
    ///
    /// Must parse as a URL; invalid values fall back to the Google Books
    /// default. Override this to point the plugin at a mirror or a local
    /// fixture server.
    pub api_base: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: catalog::DEFAULT_API_BASE.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. This function extracts typed values with
    /// fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base`: validated as a URL, default restored on parse failure
    /// - `theme` / `theme_file` / `trace_level`: `Option<String>` passthrough
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zibrary::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "not a url".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "https://www.googleapis.com/books/v1/");
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_base = config
            .get("api_base")
            .filter(|base| {
                let valid = url::Url::parse(base).is_ok();
                if !valid {
                    tracing::debug!(api_base = %base, "invalid api_base, using default");
                }
                valid
            })
            .cloned()
            .unwrap_or_else(|| catalog::DEFAULT_API_BASE.to_string());

        Self {
            api_base,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with the resolved theme (from file, name, or
/// default). The favorites shelf starts empty and is populated once the
/// worker reports the persisted collection.
///
/// # Example
///
/// ```rust
/// use zibrary::{Config, initialize};
///
/// let state = initialize(&Config::default());
/// assert!(state.favorites.is_empty());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zibrary plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme)
}
