//! Lenient schema of the catalog search response.
//!
//! The top level must be an object with a `docs` array; anything else is a
//! decode error. Inside each document every field is optional and a value
//! of the wrong shape reads as absent, so a sloppy upstream payload never
//! reaches the view as half-typed data.

use crate::domain::BookRecord;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level search response.
#[derive(Debug, Deserialize)]
pub(super) struct SearchPage {
    #[serde(default)]
    pub docs: Option<Vec<Value>>,

    #[serde(default, rename = "numFound", deserialize_with = "integer")]
    pub num_found: Option<i64>,
}

/// One search result as the catalog sends it.
#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogDoc {
    #[serde(default, deserialize_with = "text")]
    key: Option<String>,

    #[serde(default, deserialize_with = "text")]
    title: Option<String>,

    #[serde(default, deserialize_with = "strings")]
    author_name: Vec<String>,

    #[serde(default, deserialize_with = "integer")]
    first_publish_year: Option<i64>,

    #[serde(default, deserialize_with = "strings")]
    publisher: Vec<String>,

    #[serde(default, deserialize_with = "integer")]
    cover_i: Option<i64>,
}

impl CatalogDoc {
    /// Converts into a record; `None` when the document has no usable key.
    pub fn into_record(self) -> Option<BookRecord> {
        let key = self.key.filter(|k| !k.trim().is_empty())?;
        Some(BookRecord {
            key,
            title: self.title.unwrap_or_default(),
            author_name: self.author_name,
            first_publish_year: self.first_publish_year,
            publisher: self.publisher,
            cover_i: self.cover_i,
        })
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Option<BookRecord> {
        serde_json::from_str::<CatalogDoc>(json).unwrap().into_record()
    }

    #[test]
    fn well_formed_doc_maps_every_field() {
        let record = doc(r#"{
            "key": "/works/OL82563W",
            "title": "Harry Potter and the Philosopher's Stone",
            "author_name": ["J. K. Rowling"],
            "first_publish_year": 1997,
            "publisher": ["Bloomsbury", "Scholastic"],
            "cover_i": 10521270
        }"#)
        .unwrap();

        assert_eq!(record.key, "/works/OL82563W");
        assert_eq!(record.author_name, ["J. K. Rowling"]);
        assert_eq!(record.first_publish_year, Some(1997));
        assert_eq!(record.publisher.len(), 2);
        assert_eq!(record.cover_i, Some(10_521_270));
    }

    #[test]
    fn malformed_fields_read_as_absent() {
        let record = doc(r#"{
            "key": "/works/OL1W",
            "title": 12,
            "author_name": "Solo Author",
            "first_publish_year": "not a year",
            "publisher": [1, "Tor", null],
            "cover_i": {"id": 3}
        }"#)
        .unwrap();

        assert_eq!(record.title, "");
        assert_eq!(record.author_name, ["Solo Author"]);
        assert_eq!(record.first_publish_year, None);
        assert_eq!(record.publisher, ["Tor"]);
        assert_eq!(record.cover_i, None);
    }

    #[test]
    fn numeric_strings_and_whole_floats_are_accepted() {
        let record = doc(r#"{"key": "k", "first_publish_year": "1965", "cover_i": 42.0}"#).unwrap();
        assert_eq!(record.first_publish_year, Some(1965));
        assert_eq!(record.cover_i, Some(42));
    }

    #[test]
    fn doc_without_key_is_dropped() {
        assert!(doc(r#"{"title": "Orphan"}"#).is_none());
        assert!(doc(r#"{"key": 7, "title": "Numeric key"}"#).is_none());
        assert!(doc(r#"{"key": "  "}"#).is_none());
    }
}
