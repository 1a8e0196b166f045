//! Catalog client for the Open Library search API.
//!
//! - `client`: request URL construction and response decoding
//! - `schema`: lenient typed view of the response payload

pub mod client;
mod schema;

pub use client::{
    CatalogClient, CatalogPage, DEFAULT_COVER_BASE, DEFAULT_ENDPOINT, DEFAULT_RESULT_LIMIT,
    PLACEHOLDER_COVER,
};
