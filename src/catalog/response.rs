//! Volumes endpoint response parsing.
//!
//! The endpoint returns a JSON body with an optional `items` array; each item
//! carries an `id` and a `volumeInfo` object with the display fields. Parsing
//! here is total: whatever the host hands back — a non-2xx status, truncated
//! JSON, an unexpected shape — maps to a [`SearchOutcome`] variant instead of a
//! propagated error. The session layer treats `Failed` as "pretend it never
//! happened", which is the failure policy this application wants.

use crate::domain::Book;
use serde::Deserialize;

/// The settled result of one search fetch.
///
/// An explicit outcome value rather than a `Result`, because a failed fetch is
/// not an error path in this application: it clears the loading flags and
/// mutates nothing. Keeping the three cases distinct lets the session apply the
/// page-1-replace / page-n-append / empty-rollback policy without re-deriving
/// them from a list length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response carried at least one item.
    Items(Vec<Book>),

    /// The response was well-formed but carried no items.
    Empty,

    /// The fetch failed: non-success status or malformed body. Ignored.
    Failed,
}

/// Top-level volumes response body.
#[derive(Debug, Clone, Deserialize)]
struct VolumesResponse {
    /// Matching catalog items; absent when the query has no results.
    #[serde(default)]
    items: Option<Vec<VolumeItem>>,
}

/// One catalog item as returned by the endpoint.
#[derive(Debug, Clone, Deserialize)]
struct VolumeItem {
    id: String,

    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

/// Display fields nested under `volumeInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    description: Option<String>,
    published_date: Option<String>,
    publisher: Option<String>,
    image_links: Option<ImageLinks>,
}

/// Thumbnail links nested under `volumeInfo.imageLinks`.
#[derive(Debug, Clone, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<VolumeItem> for Book {
    fn from(item: VolumeItem) -> Self {
        let info = item.volume_info;
        Self {
            id: item.id,
            title: info.title,
            description: info.description,
            published_date: info.published_date,
            publisher: info.publisher,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

/// Parses a settled web request into a [`SearchOutcome`].
///
/// * Non-2xx status → [`SearchOutcome::Failed`]
/// * Body that does not parse as a volumes response → [`SearchOutcome::Failed`]
/// * Parsed body with no items (or an empty array) → [`SearchOutcome::Empty`]
/// * Otherwise → [`SearchOutcome::Items`] in response order
#[must_use]
pub fn parse_search_response(status: u16, body: &[u8]) -> SearchOutcome {
    if !(200..300).contains(&status) {
        tracing::debug!(status = status, "search fetch returned non-success status");
        return SearchOutcome::Failed;
    }

    match serde_json::from_slice::<VolumesResponse>(body) {
        Ok(response) => match response.items {
            Some(items) if !items.is_empty() => {
                let books: Vec<Book> = items.into_iter().map(Book::from).collect();
                tracing::debug!(item_count = books.len(), "search fetch settled with items");
                SearchOutcome::Items(books)
            }
            _ => {
                tracing::debug!("search fetch settled with no items");
                SearchOutcome::Empty
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "failed to parse search response body");
            SearchOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &str = r#"{
        "items": [
            {
                "id": "hp1",
                "volumeInfo": {
                    "title": "Harry Potter and the Philosopher's Stone",
                    "description": "A boy discovers he is a wizard.",
                    "publishedDate": "1997",
                    "publisher": "Bloomsbury",
                    "imageLinks": { "thumbnail": "http://example.com/hp1.jpg" }
                }
            },
            {
                "id": "hp2",
                "volumeInfo": { "title": "Harry Potter and the Chamber of Secrets" }
            }
        ]
    }"#;

    #[test]
    fn items_parse_in_response_order() {
        let outcome = parse_search_response(200, TWO_ITEMS.as_bytes());

        let SearchOutcome::Items(books) = outcome else {
            panic!("expected items");
        };
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, "hp1");
        assert_eq!(books[0].publisher.as_deref(), Some("Bloomsbury"));
        assert_eq!(
            books[0].thumbnail.as_deref(),
            Some("http://example.com/hp1.jpg")
        );
        assert_eq!(books[1].id, "hp2");
        assert!(books[1].description.is_none());
    }

    #[test]
    fn missing_items_field_is_empty() {
        assert_eq!(
            parse_search_response(200, br#"{"totalItems": 0}"#),
            SearchOutcome::Empty
        );
    }

    #[test]
    fn empty_items_array_is_empty() {
        assert_eq!(
            parse_search_response(200, br#"{"items": []}"#),
            SearchOutcome::Empty
        );
    }

    #[test]
    fn malformed_body_fails_quietly() {
        assert_eq!(
            parse_search_response(200, b"{ not json"),
            SearchOutcome::Failed
        );
    }

    #[test]
    fn error_status_fails_regardless_of_body() {
        assert_eq!(
            parse_search_response(503, TWO_ITEMS.as_bytes()),
            SearchOutcome::Failed
        );
    }

    #[test]
    fn item_without_volume_info_still_parses() {
        let outcome = parse_search_response(200, br#"{"items": [{"id": "bare"}]}"#);

        let SearchOutcome::Items(books) = outcome else {
            panic!("expected items");
        };
        assert_eq!(books[0].id, "bare");
        assert_eq!(books[0].title, "");
    }
}
