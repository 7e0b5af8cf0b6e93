//! Search request construction and correlation.
//!
//! A search request is fully described by its query string and 1-based page
//! number. The page maps onto the endpoint's `startIndex` offset with a fixed
//! page size of ten items. Because requests are issued through the Zellij host
//! and settle asynchronously as `WebRequestResult` events, each request also
//! carries a context map that round-trips the query and page back to the plugin
//! when the result arrives.

use crate::domain::error::{Result, ZibraryError};
use std::collections::BTreeMap;
use url::Url;

/// Default volumes endpoint base.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/books/v1/";

/// Fixed number of items requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Context key marking a web request as a catalog search.
const CONTEXT_KIND: &str = "kind";
/// Context value for catalog search requests.
const CONTEXT_KIND_SEARCH: &str = "catalog_search";
/// Context key carrying the query string.
const CONTEXT_QUERY: &str = "query";
/// Context key carrying the 1-based page number.
const CONTEXT_PAGE: &str = "page";

/// One outbound search request for a query/page pair.
///
/// # Examples
///
/// ```
/// use zibrary::catalog::SearchRequest;
///
/// let request = SearchRequest::new("harry potter", 3);
/// assert_eq!(request.start_index(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Raw query text as typed by the user.
    pub query: String,

    /// 1-based page number.
    pub page: u32,
}

impl SearchRequest {
    /// Creates a request for the given query and page.
    #[must_use]
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }

    /// Returns the `startIndex` offset for this page.
    ///
    /// Page 1 starts at offset 0, page 2 at 10, and so on. Saturating
    /// arithmetic keeps a rolled-back page counter from wrapping.
    #[must_use]
    pub fn start_index(&self) -> u32 {
        self.page.saturating_sub(1) * PAGE_SIZE
    }

    /// Builds the request URL against the configured API base.
    ///
    /// The query is attached via URL query pairs, so user input is
    /// percent-encoded rather than spliced into the path.
    ///
    /// # Errors
    ///
    /// Returns [`ZibraryError::Api`] if the base cannot be parsed or joined.
    /// The configuration layer validates the base at load time, so in practice
    /// this only fires for a hand-crafted base without a trailing path.
    pub fn to_url(&self, api_base: &str) -> Result<Url> {
        let base = Url::parse(api_base)
            .map_err(|e| ZibraryError::Api(format!("invalid API base {api_base:?}: {e}")))?;
        let mut url = base
            .join("volumes")
            .map_err(|e| ZibraryError::Api(format!("cannot join volumes path: {e}")))?;

        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("startIndex", &self.start_index().to_string());

        Ok(url)
    }

    /// Encodes this request into a web-request context map.
    ///
    /// The host echoes the context back verbatim on the matching
    /// `WebRequestResult` event, which is the only way to know which page a
    /// settling response belongs to.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KIND.to_string(), CONTEXT_KIND_SEARCH.to_string());
        context.insert(CONTEXT_QUERY.to_string(), self.query.clone());
        context.insert(CONTEXT_PAGE.to_string(), self.page.to_string());
        context
    }

    /// Decodes a request from an echoed web-request context map.
    ///
    /// Returns `None` for contexts that are not catalog searches (other
    /// plugin-issued requests, or foreign events), or whose page field does
    /// not parse.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(CONTEXT_KIND).map(String::as_str) != Some(CONTEXT_KIND_SEARCH) {
            return None;
        }

        let query = context.get(CONTEXT_QUERY)?.clone();
        let page = context.get(CONTEXT_PAGE)?.parse::<u32>().ok()?;

        Some(Self { query, page })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_index_steps_by_page_size() {
        assert_eq!(SearchRequest::new("q", 1).start_index(), 0);
        assert_eq!(SearchRequest::new("q", 2).start_index(), 10);
        assert_eq!(SearchRequest::new("q", 5).start_index(), 40);
    }

    #[test]
    fn start_index_saturates_on_page_zero() {
        assert_eq!(SearchRequest::new("q", 0).start_index(), 0);
    }

    #[test]
    fn url_targets_volumes_with_encoded_query() {
        let url = SearchRequest::new("harry potter", 1)
            .to_url(DEFAULT_API_BASE)
            .unwrap();

        assert_eq!(url.host_str(), Some("www.googleapis.com"));
        assert_eq!(url.path(), "/books/v1/volumes");
        assert_eq!(
            url.query(),
            Some("q=harry+potter&startIndex=0")
        );
    }

    #[test]
    fn url_rejects_garbage_base() {
        assert!(SearchRequest::new("q", 1).to_url("not a url").is_err());
    }

    #[test]
    fn context_round_trips() {
        let request = SearchRequest::new("dune", 4);
        let decoded = SearchRequest::from_context(&request.to_context()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("kind".to_string(), "something_else".to_string());
        assert!(SearchRequest::from_context(&context).is_none());
        assert!(SearchRequest::from_context(&BTreeMap::new()).is_none());
    }
}
