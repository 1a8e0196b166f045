//! Domain layer for the BookMate plugin.
//!
//! Core types independent of Zellij APIs and of the storage and catalog
//! adapters.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Catalog book record
//! - [`favorites`]: Ordered, key-unique favorites list
//! - [`theme_mode`]: Light/dark preference
//!
//! # Examples
//!
//! ```
//! use bookmate::domain::{BookRecord, Favorites, Toggle};
//!
//! let mut favorites = Favorites::default();
//! let book = BookRecord::new("/works/OL82563W", "Harry Potter and the Philosopher's Stone");
//! assert_eq!(favorites.toggle(&book), Toggle::Added);
//! assert!(favorites.contains("/works/OL82563W"));
//! ```

pub mod book;
pub mod error;
pub mod favorites;
pub mod theme_mode;

pub use book::BookRecord;
pub use error::{BookmateError, CatalogError, Result};
pub use favorites::{Favorites, Toggle};
pub use theme_mode::ThemeMode;
