//! Favorites set.
//!
//! An ordered list of [`BookRecord`]s unique by key. Toggling is the only
//! mutation; the whole list is serialized after every toggle and written
//! through to storage by the controller.

use super::book::BookRecord;
use serde::Serialize;

/// Outcome of [`Favorites::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The book was appended to the end of the list.
    Added,
    /// A book with the same key was removed.
    Removed,
}

/// User-curated list of books, unique by [`BookRecord::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites {
    books: Vec<BookRecord>,
}

impl Favorites {
    /// Builds a favorites list, dropping later duplicates of a key.
    #[must_use]
    pub fn from_books(books: Vec<BookRecord>) -> Self {
        let mut favorites = Self::default();
        for book in books {
            if !favorites.contains(&book.key) {
                favorites.books.push(book);
            }
        }
        favorites
    }

    /// Restores favorites from a persisted value.
    ///
    /// Absent values, `null`, and anything that is not a JSON array of book
    /// records yield an empty list. Corruption is logged, never returned.
    ///
    /// ```
    /// use bookmate::domain::Favorites;
    ///
    /// assert!(Favorites::from_persisted(None).is_empty());
    /// assert!(Favorites::from_persisted(Some("{not json")).is_empty());
    /// assert_eq!(Favorites::from_persisted(Some(r#"[{"key":"/works/OL1W"}]"#)).len(), 1);
    /// ```
    #[must_use]
    pub fn from_persisted(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::debug!("no persisted favorites");
            return Self::default();
        };

        match serde_json::from_str::<Option<Vec<BookRecord>>>(raw) {
            Ok(books) => {
                let favorites = Self::from_books(books.unwrap_or_default());
                tracing::debug!(count = favorites.len(), "favorites restored");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, raw_len = raw.len(), "persisted favorites are corrupt, starting empty");
                Self::default()
            }
        }
    }

    /// Serializes the whole list for storage.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails.
    pub fn to_persisted(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.books)
    }

    /// Removes the book with the same key if present, otherwise appends it.
    pub fn toggle(&mut self, book: &BookRecord) -> Toggle {
        if let Some(position) = self.books.iter().position(|b| b.key == book.key) {
            self.books.remove(position);
            Toggle::Removed
        } else {
            self.books.push(book.clone());
            Toggle::Added
        }
    }

    /// Whether a book with `key` is in the list.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.books.iter().any(|b| b.key == key)
    }

    #[must_use]
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(n: u32) -> BookRecord {
        BookRecord::new(format!("/works/OL{n}W"), format!("Book {n}"))
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut favorites = Favorites::default();
        assert_eq!(favorites.toggle(&book(1)), Toggle::Added);
        assert_eq!(favorites.toggle(&book(2)), Toggle::Added);
        assert_eq!(favorites.books()[1].key, "/works/OL2W");

        assert_eq!(favorites.toggle(&book(1)), Toggle::Removed);
        assert_eq!(favorites.len(), 1);
        assert!(!favorites.contains("/works/OL1W"));
    }

    #[test]
    fn toggle_matches_on_key_only() {
        let mut favorites = Favorites::default();
        favorites.toggle(&book(1));

        let mut renamed = book(1);
        renamed.title = "Another edition".into();
        assert_eq!(favorites.toggle(&renamed), Toggle::Removed);
        assert!(favorites.is_empty());
    }

    #[test]
    fn add_then_remove_restores_original_list() {
        let mut favorites = Favorites::from_books(vec![book(1), book(2)]);
        let original = favorites.clone();

        favorites.toggle(&book(3));
        favorites.toggle(&book(3));

        assert_eq!(favorites, original);
    }

    #[test]
    fn keys_stay_unique_over_any_toggle_sequence() {
        let mut favorites = Favorites::default();
        for n in [1, 2, 1, 3, 2, 2, 4, 1, 1, 3] {
            favorites.toggle(&book(n));
            let mut keys: Vec<&str> = favorites.books().iter().map(|b| b.key.as_str()).collect();
            let before = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), before);
        }
    }

    #[test]
    fn persisted_form_round_trips() {
        let mut favorites = Favorites::default();
        favorites.toggle(&book(5));
        favorites.toggle(&book(3));

        let raw = favorites.to_persisted().unwrap();
        let restored = Favorites::from_persisted(Some(&raw));

        let keys: Vec<&str> = restored.books().iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["/works/OL5W", "/works/OL3W"]);
    }

    #[test]
    fn persisted_null_and_corrupt_values_are_empty() {
        assert!(Favorites::from_persisted(Some("null")).is_empty());
        assert!(Favorites::from_persisted(Some("{\"key\": 1}")).is_empty());
        assert!(Favorites::from_persisted(Some("[{\"title\":\"no key\"}]")).is_empty());
    }

    #[test]
    fn persisted_duplicates_collapse_to_first() {
        let raw = r#"[{"key":"/works/A","title":"first"},{"key":"/works/A","title":"second"}]"#;
        let favorites = Favorites::from_persisted(Some(raw));
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.books()[0].title, "first");
    }
}
