//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or system events.
//! Actions bridge pure state transformations and effectful operations like
//! scheduling the debounce timer, issuing catalog fetches, or communicating
//! with the background worker.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The plugin runtime
//! executes them in sequence.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Schedules the debounce timer for the given query generation.
    ///
    /// The runtime arms a fixed-delay timer and remembers the generation; when
    /// the timer fires, the generation is handed back so stale timers (ones
    /// superseded by a later keystroke) can be discarded. This is what makes
    /// scheduling a new debounce atomically cancel the previous one.
    ScheduleDebounce {
        /// Debounce generation this timer belongs to.
        generation: u64,
    },

    /// Issues a catalog fetch for a query/page pair via the host.
    ///
    /// The request settles later as a web request result event carrying the
    /// same query and page in its context.
    FetchPage {
        /// Query text to search for.
        query: String,
        /// 1-based page to fetch.
        page: u32,
    },

    /// Posts a message to the background worker thread.
    ///
    /// Enables favorites operations without blocking the main event loop.
    PostToWorker(WorkerMessage),
}
