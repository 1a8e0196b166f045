//! Book record model.
//!
//! A [`BookRecord`] is a read-only projection of one catalog search result.
//! Field names follow the catalog payload so that persisted favorites look
//! exactly like the entries the API returned.

use serde::{Deserialize, Serialize};

/// Label shown when a record has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Label shown for missing year or publisher.
pub const NOT_AVAILABLE: &str = "N/A";

/// One catalog entry.
///
/// `key` identifies the entry and is the only field used for identity; the
/// remaining fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Catalog key, e.g. `/works/OL82563W`.
    pub key: String,

    /// Title as returned by the catalog (may be empty).
    #[serde(default)]
    pub title: String,

    /// Author names in catalog order.
    #[serde(default)]
    pub author_name: Vec<String>,

    /// Year of first publication.
    #[serde(default)]
    pub first_publish_year: Option<i64>,

    /// Publisher names in catalog order.
    #[serde(default)]
    pub publisher: Vec<String>,

    /// Cover image identifier.
    #[serde(default)]
    pub cover_i: Option<i64>,
}

impl BookRecord {
    /// Creates a record with only a key and title set.
    ///
    /// ```
    /// use bookmate::domain::BookRecord;
    ///
    /// let book = BookRecord::new("/works/OL1W", "Dune");
    /// assert_eq!(book.primary_author(), "Unknown");
    /// assert_eq!(book.year_label(), "N/A");
    /// ```
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            author_name: Vec::new(),
            first_publish_year: None,
            publisher: Vec::new(),
            cover_i: None,
        }
    }

    /// Title for display, `"Untitled"` when the catalog sent none.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// First author, or [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn primary_author(&self) -> &str {
        self.author_name
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// First publisher, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn primary_publisher(&self) -> &str {
        self.publisher
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// First publish year as text, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn year_label(&self) -> String {
        self.first_publish_year
            .map_or_else(|| NOT_AVAILABLE.to_string(), |year| year.to_string())
    }

    /// Cover image URL derived from `cover_i`, or `placeholder` when absent.
    ///
    /// ```
    /// use bookmate::domain::BookRecord;
    ///
    /// let mut book = BookRecord::new("/works/OL1W", "Dune");
    /// assert_eq!(book.cover_url("https://covers.openlibrary.org/b/id", "none"), "none");
    /// book.cover_i = Some(42);
    /// assert_eq!(
    ///     book.cover_url("https://covers.openlibrary.org/b/id", "none"),
    ///     "https://covers.openlibrary.org/b/id/42-M.jpg"
    /// );
    /// ```
    #[must_use]
    pub fn cover_url(&self, cover_base: &str, placeholder: &str) -> String {
        self.cover_i.map_or_else(
            || placeholder.to_string(),
            |id| format!("{}/{id}-M.jpg", cover_base.trim_end_matches('/')),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_when_fields_are_missing_or_blank() {
        let mut book = BookRecord::new("/works/OL1W", "  ");
        book.author_name = vec![String::new()];
        assert_eq!(book.display_title(), "Untitled");
        assert_eq!(book.primary_author(), UNKNOWN_AUTHOR);
        assert_eq!(book.primary_publisher(), NOT_AVAILABLE);
    }

    #[test]
    fn labels_use_first_entries() {
        let mut book = BookRecord::new("/works/OL1W", "Dune");
        book.author_name = vec!["Frank Herbert".into(), "Someone Else".into()];
        book.publisher = vec!["Chilton".into()];
        book.first_publish_year = Some(1965);
        assert_eq!(book.primary_author(), "Frank Herbert");
        assert_eq!(book.primary_publisher(), "Chilton");
        assert_eq!(book.year_label(), "1965");
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let book: BookRecord = serde_json::from_str(r#"{"key":"/works/OL9W"}"#).unwrap();
        assert_eq!(book, BookRecord::new("/works/OL9W", ""));
    }
}
