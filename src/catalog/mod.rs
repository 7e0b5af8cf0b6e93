//! Remote catalog access layer.
//!
//! This module owns everything about the volumes search endpoint: building the
//! request URL for a query/page pair, correlating an in-flight request with its
//! eventual host-delivered result, and parsing the response body into an explicit
//! outcome value.
//!
//! The endpoint itself is an opaque HTTP JSON service; the plugin issues requests
//! through the Zellij host (`web_request`) and receives results as events, so no
//! HTTP client lives in this crate.
//!
//! # Modules
//!
//! - [`request`]: Page/offset math, URL construction, result correlation context
//! - [`response`]: Response body types and total parsing into [`SearchOutcome`]
//!
//! [`SearchOutcome`]: response::SearchOutcome

pub mod request;
pub mod response;

pub use request::{SearchRequest, DEFAULT_API_BASE, PAGE_SIZE};
pub use response::{parse_search_response, SearchOutcome};
