//! Catalog request building and response decoding.

use super::schema::{CatalogDoc, SearchPage};
use crate::domain::{BookRecord, CatalogError};
use url::Url;

/// Public Open Library search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Base URL for cover images; `<base>/<cover_i>-M.jpg`.
pub const DEFAULT_COVER_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Image shown for records without a cover.
pub const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/150x220?text=No+Cover";

/// Maximum number of records taken from one response.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Query parameter carrying the title.
const TITLE_PARAM: &str = "title";

/// Results field of the search response.
const RESULTS_FIELD: &str = "docs";

/// Decoded search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Up to `result_limit` records, in the order the catalog returned them.
    pub books: Vec<BookRecord>,

    /// Total number of matches reported by the catalog, if any.
    pub total_matches: Option<i64>,
}

/// Builds search requests and decodes their responses.
///
/// The plugin host performs the HTTP call itself, so the client is split
/// into [`search_url`](Self::search_url) and [`decode`](Self::decode).
///
/// # Examples
///
/// ```
/// use bookmate::catalog::CatalogClient;
///
/// let client = CatalogClient::default();
/// assert_eq!(
///     client.search_url("harry potter").as_deref(),
///     Some("https://openlibrary.org/search.json?title=harry+potter")
/// );
/// assert_eq!(client.search_url("   "), None);
///
/// let page = client.decode(200, br#"{"docs":[{"key":"/works/OL1W","title":"Dune"}]}"#)?;
/// assert_eq!(page.books[0].title, "Dune");
/// # Ok::<(), bookmate::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    endpoint: Url,
    limit: usize,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("built-in endpoint should always parse"),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl CatalogClient {
    /// Creates a client for `endpoint` keeping at most `limit` records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Endpoint`] if `endpoint` is not an absolute URL.
    pub fn new(endpoint: &str, limit: usize) -> Result<Self, CatalogError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            limit,
        })
    }

    /// Maximum number of records kept from a response.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Request URL for a title query, `None` for empty or blank queries.
    ///
    /// The query is sent as typed (not trimmed) and form-encoded.
    #[must_use]
    pub fn search_url(&self, query: &str) -> Option<String> {
        if query.trim().is_empty() {
            return None;
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(TITLE_PARAM, query);
        Some(String::from(url))
    }

    /// Decodes a search response.
    ///
    /// Takes the first `limit` entries of the results array in API order,
    /// then drops entries without a usable key. The cap counts raw entries,
    /// so a page with keyless or non-object entries among its first `limit`
    /// yields fewer than `limit` records even when the API returned more.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Status`] for a non-2xx status
    /// - [`CatalogError::Encoding`] / [`CatalogError::Json`] for unreadable bodies
    /// - [`CatalogError::MissingResults`] when the results array is absent
    pub fn decode(&self, status: u16, body: &[u8]) -> Result<CatalogPage, CatalogError> {
        let _span = tracing::debug_span!("catalog_decode", status, body_len = body.len()).entered();

        if !(200..300).contains(&status) {
            return Err(CatalogError::Status(status));
        }

        let text = String::from_utf8(body.to_vec())?;
        let page: SearchPage = serde_json::from_str(&text)?;
        let docs = page.docs.ok_or(CatalogError::MissingResults(RESULTS_FIELD))?;
        let received = docs.len();

        let books: Vec<BookRecord> = docs
            .into_iter()
            .take(self.limit)
            .filter_map(|doc| match serde_json::from_value::<CatalogDoc>(doc) {
                Ok(doc) => doc.into_record(),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping catalog entry that is not an object");
                    None
                }
            })
            .collect();

        tracing::debug!(received, kept = books.len(), total = ?page.num_found, "catalog response decoded");

        Ok(CatalogPage {
            books,
            total_matches: page.num_found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_body(count: usize) -> Vec<u8> {
        let docs: Vec<serde_json::Value> = (0..count)
            .map(|i| serde_json::json!({ "key": format!("/works/OL{i}W"), "title": format!("Book {i}") }))
            .collect();
        serde_json::json!({ "numFound": count, "docs": docs }).to_string().into_bytes()
    }

    #[test]
    fn query_is_url_encoded() {
        let client = CatalogClient::default();
        let url = client.search_url("tom & jerry/100%").unwrap();
        assert_eq!(url, "https://openlibrary.org/search.json?title=tom+%26+jerry%2F100%25");
    }

    #[test]
    fn query_is_appended_to_existing_parameters() {
        let client = CatalogClient::new("https://example.org/search.json?mode=everything", 5).unwrap();
        assert_eq!(
            client.search_url("dune").as_deref(),
            Some("https://example.org/search.json?mode=everything&title=dune")
        );
    }

    #[test]
    fn blank_queries_build_no_request() {
        let client = CatalogClient::default();
        assert!(client.search_url("").is_none());
        assert!(client.search_url(" \t\n").is_none());
    }

    #[test]
    fn relative_endpoint_is_rejected() {
        assert!(matches!(
            CatalogClient::new("/search.json", 20),
            Err(CatalogError::Endpoint(_))
        ));
    }

    #[test]
    fn response_is_truncated_in_order() {
        let page = CatalogClient::default().decode(200, &synthetic_body(25)).unwrap();
        assert_eq!(page.books.len(), 20);
        assert_eq!(page.books[0].key, "/works/OL0W");
        assert_eq!(page.books[19].key, "/works/OL19W");
        assert_eq!(page.total_matches, Some(25));
    }

    #[test]
    fn failures_are_typed() {
        let client = CatalogClient::default();
        assert!(matches!(client.decode(503, b"{}"), Err(CatalogError::Status(503))));
        assert!(matches!(client.decode(200, b"<html>"), Err(CatalogError::Json(_))));
        assert!(matches!(client.decode(200, &[0xff, 0xfe]), Err(CatalogError::Encoding(_))));
        assert!(matches!(
            client.decode(200, br#"{"numFound": 0}"#),
            Err(CatalogError::MissingResults("docs"))
        ));
    }

    #[test]
    fn limit_counts_entries_before_keyless_ones_are_dropped() {
        let client = CatalogClient::new(DEFAULT_ENDPOINT, 3).unwrap();
        let body = br#"{"docs": [{"key": "/works/OL1W"}, {"title": "No key"}, {"key": "/works/OL3W"}, {"key": "/works/OL4W"}]}"#;

        let page = client.decode(200, body).unwrap();

        let keys: Vec<_> = page.books.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["/works/OL1W", "/works/OL3W"]);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = br#"{"docs": [42, {"key": "/works/OL1W"}, "text"]}"#;
        let page = CatalogClient::default().decode(200, body).unwrap();
        assert_eq!(page.books.len(), 1);
        assert_eq!(page.total_matches, None);
    }
}
