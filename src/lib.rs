//! BookMate: a Zellij plugin for searching the Open Library catalog.
//!
//! BookMate shows a searchable card grid of books with a sidebar holding a
//! search box, a light/dark theme switch and the list of favorite books.
//! Favorites and the theme survive restarts.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, HTTP, timers
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← state machine
//! │  - Event handling, sequence-numbered searches       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Card grid   │   │ - Query URL   │   │ - Preferences │
//! │ - Sidebar     │   │ - Lenient     │   │   load/store  │
//! │ - Palettes    │   │   decoding    │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ Storage       │
//!                                         │ (storage/)    │
//!                                         │ key → value   │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: state, events, actions
//! - [`catalog`]: Open Library request and response handling
//! - [`domain`]: book records, favorites, theme mode, errors
//! - [`infrastructure`]: sandbox paths
//! - [`storage`]: key-value persistence
//! - [`worker`]: background storage worker
//! - [`ui`]: terminal rendering
//! - [`observability`]: tracing with file-based OTLP export
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookmate.wasm" {
//!         default_query "harry potter"
//!         result_limit "20"
//!         request_timeout_secs "10"
//!         narrow_width "100"
//!         dark_theme_file "~/.config/bookmate/dark.toml"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Startup
//!
//! 1. The shim parses [`Config`], calls [`initialize`] and requests the
//!    `WebAccess` permission.
//! 2. Once granted, the worker is asked for the stored theme and favorites.
//! 3. The loaded theme is applied and the default query is searched.
//!
//! # Example
//!
//! ```
//! use bookmate::{handle_event, initialize, Action, Config, Event};
//! use bookmate::worker::WorkerResponse;
//! use std::collections::BTreeMap;
//!
//! let mut state = initialize(&Config::default());
//!
//! let loaded = Event::WorkerResponse(WorkerResponse::ValuesLoaded { values: BTreeMap::new() });
//! let (_, actions) = handle_event(&mut state, &loaded)?;
//!
//! assert!(actions.iter().any(|a| matches!(a, Action::FetchCatalog { .. })));
//! # Ok::<(), bookmate::BookmateError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Direction, Event, InputMode, SearchStatus, ViewMode};
pub use domain::{BookRecord, BookmateError, CatalogError, Result, ThemeMode};
pub use ui::Theme;

use app::state::{Settings, DEFAULT_GREETING, DEFAULT_NARROW_WIDTH, DEFAULT_QUERY, DEFAULT_TIMEOUT_SECS};
use catalog::{CatalogClient, DEFAULT_COVER_BASE, DEFAULT_ENDPOINT, DEFAULT_RESULT_LIMIT, PLACEHOLDER_COVER};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Plugin configuration parsed from Zellij's KDL plugin block.
///
/// Every field has a default; unparsable values fall back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog search endpoint. Default: Open Library's `search.json`.
    pub endpoint: String,

    /// Base URL for cover images, `<base>/<cover_i>-M.jpg`.
    pub cover_base: String,

    /// Shown for books without a cover id.
    pub placeholder_cover: String,

    /// Searched on startup. Default: `"harry potter"`.
    pub default_query: String,

    /// Records kept per search, 1 to 100. Default: 20
    pub result_limit: usize,

    /// Seconds before an unanswered search fails. Default: 10
    pub request_timeout_secs: u32,

    /// Panes narrower than this hide the sidebar. Default: 100
    pub narrow_width: usize,

    /// Sidebar greeting.
    pub greeting: String,

    /// TOML palette replacing the built-in light theme.
    pub light_theme_file: Option<String>,

    /// TOML palette replacing the built-in dark theme.
    pub dark_theme_file: Option<String>,

    /// `EnvFilter` directive, e.g. `"debug"`. Default: `"info"`
    pub trace_level: Option<String>,
}

const MAX_RESULT_LIMIT: usize = 100;

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cover_base: DEFAULT_COVER_BASE.to_string(),
            placeholder_cover: PLACEHOLDER_COVER.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            narrow_width: DEFAULT_NARROW_WIDTH,
            greeting: DEFAULT_GREETING.to_string(),
            light_theme_file: None,
            dark_theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij passes to `load`.
    ///
    /// Blank strings count as unset. Numbers that do not parse, or fall
    /// outside their range, keep the default.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use bookmate::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("default_query".to_string(), "dune".to_string()),
    ///     ("result_limit".to_string(), "five".to_string()),
    ///     ("request_timeout_secs".to_string(), "30".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_query, "dune");
    /// assert_eq!(config.result_limit, 20);
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            endpoint: text("endpoint").unwrap_or(defaults.endpoint),
            cover_base: text("cover_base").unwrap_or(defaults.cover_base),
            placeholder_cover: text("placeholder_cover").unwrap_or(defaults.placeholder_cover),
            default_query: text("default_query").unwrap_or(defaults.default_query),
            result_limit: parse_in_range(config, "result_limit", 1..=MAX_RESULT_LIMIT)
                .unwrap_or(defaults.result_limit),
            request_timeout_secs: parse_in_range(config, "request_timeout_secs", 1..=300)
                .unwrap_or(defaults.request_timeout_secs),
            narrow_width: parse_in_range(config, "narrow_width", 0..=usize::MAX)
                .unwrap_or(defaults.narrow_width),
            greeting: text("greeting").unwrap_or(defaults.greeting),
            light_theme_file: text("light_theme_file"),
            dark_theme_file: text("dark_theme_file"),
            trace_level: text("trace_level"),
        }
    }
}

fn parse_in_range<T>(config: &BTreeMap<String, String>, key: &str, range: std::ops::RangeInclusive<T>) -> Option<T>
where
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let raw = config.get(key)?.trim();
    match raw.parse::<T>() {
        Ok(value) if range.contains(&value) => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "invalid configuration value, using default");
            None
        }
    }
}

/// Builds the initial state: default query typed in, nothing loaded yet.
///
/// No I/O happens here; stored preferences arrive through the worker once
/// permissions are granted. An endpoint that is not a valid URL is logged and
/// replaced with Open Library's.
///
/// ```
/// use bookmate::{initialize, Config};
///
/// let state = initialize(&Config { endpoint: "not a url".into(), ..Config::default() });
/// assert_eq!(state.query, "harry potter");
/// assert!(!state.is_loading());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing bookmate plugin");

    let catalog = CatalogClient::new(&config.endpoint, config.result_limit).unwrap_or_else(|e| {
        tracing::warn!(endpoint = %config.endpoint, error = %e, "invalid catalog endpoint, using default");
        CatalogClient::default()
    });

    let settings = Settings {
        default_query: config.default_query.clone(),
        request_timeout_secs: config.request_timeout_secs,
        narrow_width: config.narrow_width,
        greeting: config.greeting.clone(),
        cover_base: config.cover_base.clone(),
        placeholder_cover: config.placeholder_cover.clone(),
    };

    AppState::new(settings, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn out_of_range_numbers_keep_defaults() {
        let map = BTreeMap::from([
            ("result_limit".to_string(), "0".to_string()),
            ("request_timeout_secs".to_string(), "-3".to_string()),
            ("narrow_width".to_string(), " 120 ".to_string()),
            ("greeting".to_string(), "   ".to_string()),
        ]);

        let config = Config::from_zellij(&map);

        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.narrow_width, 120);
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn initialize_carries_settings() {
        let config = Config {
            default_query: "solaris".into(),
            result_limit: 5,
            request_timeout_secs: 3,
            ..Config::default()
        };

        let state = initialize(&config);

        assert_eq!(state.query, "solaris");
        assert_eq!(state.catalog.limit(), 5);
        assert_eq!(state.settings.request_timeout_secs, 3);
    }
}
