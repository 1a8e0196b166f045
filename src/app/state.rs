//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the UI shows: the query,
//! the result list, the in-flight search, favorites, theme and sidebar flag.
//! The event handler mutates it; the renderer only reads the
//! [`UIViewModel`] computed from it.
//!
//! # Search lifecycle
//!
//! Every submitted search gets a fresh sequence number and becomes the
//! pending search. A response or timeout is applied only when it carries the
//! pending number, so the results on screen always belong to the most
//! recently submitted query. Loading is simply "a search is pending".

use super::modes::{Direction, InputMode, ViewMode};
use crate::catalog::{CatalogClient, CatalogPage, DEFAULT_COVER_BASE, PLACEHOLDER_COVER};
use crate::domain::{BookRecord, Favorites, ThemeMode};
use crate::ui::helpers::truncate;
use crate::ui::viewmodel::{
    CardItem, ContentState, EmptyState, FooterInfo, HeaderInfo, LayoutInfo, SearchBarInfo,
    SidebarInfo, SidebarPlacement, StatusLine, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Query searched once preferences are loaded.
pub const DEFAULT_QUERY: &str = "harry potter";

/// Seconds before an unanswered search is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u32 = 10;

/// Panes narrower than this hide the sidebar behind a toggle.
pub const DEFAULT_NARROW_WIDTH: usize = 100;

/// Sidebar greeting.
pub const DEFAULT_GREETING: &str = "Hey Alex! Search books, explore details, and save your favorites.";

/// Width of the sidebar column, border included.
pub const SIDEBAR_WIDTH: usize = 32;

/// Height of one card, borders included.
pub const CARD_HEIGHT: usize = 8;

/// Columns of a grid cell not available to card text: gap, borders, padding.
pub const CARD_INSET: usize = 6;

const CARD_MIN_WIDTH: usize = 32;
const MAX_GRID_COLUMNS: usize = 3;

/// Rows taken by header, borders, status line and footer.
const CHROME_ROWS: usize = 6;

const LOADING_MESSAGE: &str = "Loading books...";
const NO_RESULTS_MESSAGE: &str = "No books found. Try a different search!";
const NO_FAVORITES_MESSAGE: &str = "No favorites yet.";
const SEARCH_PLACEHOLDER: &str = "Search by title...";

/// User-tunable behavior, filled from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_query: String,
    pub request_timeout_secs: u32,
    pub narrow_width: usize,
    pub greeting: String,
    pub cover_base: String,
    pub placeholder_cover: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            narrow_width: DEFAULT_NARROW_WIDTH,
            greeting: DEFAULT_GREETING.to_string(),
            cover_base: DEFAULT_COVER_BASE.to_string(),
            placeholder_cover: PLACEHOLDER_COVER.to_string(),
        }
    }
}

/// Outcome of the most recent completed search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// No search has completed yet.
    #[default]
    Idle,

    /// The last search succeeded.
    Ready {
        count: usize,
        total_matches: Option<i64>,
        fetched_at: DateTime<Utc>,
    },

    /// The last search failed; the previous results are still shown.
    Failed { reason: String },
}

/// The search whose response is awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: u64,
    pub query: String,
}

/// Pane size from the last render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub catalog: CatalogClient,

    /// Text in the search box.
    pub query: String,

    /// Records of the last successful search, at most `catalog.limit()`.
    pub results: Vec<BookRecord>,

    /// Query that produced `results`.
    pub results_query: String,

    pub pending: Option<PendingSearch>,
    pub status: SearchStatus,
    pub favorites: Favorites,
    pub theme: ThemeMode,

    /// Sidebar visibility on narrow panes; wide panes always show it.
    pub sidebar_open: bool,

    pub input_mode: InputMode,
    pub view_mode: ViewMode,

    /// Index into the visible list (results or favorites).
    pub selected_index: usize,

    /// Set once stored theme and favorites have been applied.
    pub preferences_loaded: bool,

    /// Set once the preference load has been requested.
    pub preferences_requested: bool,

    /// Storage or permission problem to surface in the status line.
    pub notice: Option<String>,

    pub viewport: Viewport,

    last_seq: u64,
}

impl AppState {
    /// Creates the initial state: default query typed in, nothing loaded.
    #[must_use]
    pub fn new(settings: Settings, catalog: CatalogClient) -> Self {
        Self {
            query: settings.default_query.clone(),
            settings,
            catalog,
            results: Vec::new(),
            results_query: String::new(),
            pending: None,
            status: SearchStatus::Idle,
            favorites: Favorites::default(),
            theme: ThemeMode::default(),
            sidebar_open: false,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Results,
            selected_index: 0,
            preferences_loaded: false,
            preferences_requested: false,
            notice: None,
            viewport: Viewport::default(),
            last_seq: 0,
        }
    }

    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether stored preferences were requested but have not arrived yet.
    ///
    /// A preference written in this window would be overwritten by the
    /// older value the worker is about to return.
    #[must_use]
    pub const fn preferences_pending(&self) -> bool {
        self.preferences_requested && !self.preferences_loaded
    }

    /// Starts a search for `query`, superseding any pending one.
    ///
    /// Returns the sequence number and request URL, or `None` for a blank
    /// query, in which case nothing changes.
    pub fn begin_search(&mut self, query: &str) -> Option<(u64, String)> {
        let url = self.catalog.search_url(query)?;

        self.last_seq += 1;
        let seq = self.last_seq;
        if let Some(previous) = self.pending.replace(PendingSearch {
            seq,
            query: query.to_string(),
        }) {
            tracing::debug!(superseded = previous.seq, seq, "search superseded");
        }
        self.notice = None;

        Some((seq, url))
    }

    /// Removes and returns the pending search if it has sequence `seq`.
    pub fn take_pending(&mut self, seq: u64) -> Option<PendingSearch> {
        if self.pending.as_ref().is_some_and(|p| p.seq == seq) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Replaces the results with a decoded page.
    pub fn apply_results(&mut self, search: PendingSearch, page: CatalogPage) {
        self.status = SearchStatus::Ready {
            count: page.books.len(),
            total_matches: page.total_matches,
            fetched_at: Utc::now(),
        };
        self.results = page.books;
        self.results_query = search.query;

        if self.view_mode == ViewMode::Results {
            self.selected_index = 0;
        }
    }

    /// Marks the last search as failed, keeping the current results.
    pub fn fail_search(&mut self, reason: impl Into<String>) {
        self.status = SearchStatus::Failed {
            reason: reason.into(),
        };
    }

    /// The list the grid shows in the current view mode.
    #[must_use]
    pub fn visible_books(&self) -> &[BookRecord] {
        match self.view_mode {
            ViewMode::Results => &self.results,
            ViewMode::Favorites => self.favorites.books(),
        }
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.visible_books().get(self.selected_index)
    }

    /// Keeps the selection inside the visible list.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
    }

    /// Moves the selection inside the grid. Returns whether it moved.
    pub fn move_selection(&mut self, direction: Direction) -> bool {
        let len = self.visible_books().len();
        if len == 0 {
            return false;
        }

        let columns = self.layout(self.viewport.cols).grid_columns;
        let current = self.selected_index.min(len - 1);
        let next = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(len - 1),
            Direction::Up => current.checked_sub(columns).unwrap_or(current),
            Direction::Down if current + columns < len => current + columns,
            Direction::Down => current,
        };

        self.selected_index = next;
        next != current
    }

    /// Frame geometry for a pane `cols` wide.
    #[must_use]
    pub fn layout(&self, cols: usize) -> LayoutInfo {
        let (sidebar, content_col, content_width) = if cols >= self.settings.narrow_width {
            (SidebarPlacement::Docked, SIDEBAR_WIDTH + 2, cols.saturating_sub(SIDEBAR_WIDTH + 1))
        } else if self.sidebar_open {
            (SidebarPlacement::Overlay, 1, cols)
        } else {
            (SidebarPlacement::Hidden, 1, cols)
        };

        LayoutInfo {
            sidebar,
            sidebar_width: SIDEBAR_WIDTH.min(cols),
            content_col,
            content_width,
            grid_columns: (content_width / CARD_MIN_WIDTH).clamp(1, MAX_GRID_COLUMNS),
        }
    }

    /// Computes the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = self.layout(cols);

        UIViewModel {
            layout,
            sidebar: (layout.sidebar != SidebarPlacement::Hidden).then(|| self.compute_sidebar()),
            header: self.compute_header(),
            content: self.compute_content(rows, &layout),
            status: self.compute_status(),
            footer: self.compute_footer(&layout),
        }
    }

    fn compute_sidebar(&self) -> SidebarInfo {
        let favorites: Vec<String> = self
            .favorites
            .books()
            .iter()
            .map(|book| book.display_title().to_string())
            .collect();

        SidebarInfo {
            title: "BookMate".to_string(),
            theme_label: match self.theme {
                ThemeMode::Light => "Dark",
                ThemeMode::Dark => "Light",
            }
            .to_string(),
            greeting: self.settings.greeting.clone(),
            search: SearchBarInfo {
                query: self.query.clone(),
                placeholder: SEARCH_PLACEHOLDER.to_string(),
                is_editing: self.input_mode == InputMode::Editing,
            },
            favorites_empty: favorites.is_empty().then(|| NO_FAVORITES_MESSAGE.to_string()),
            favorites,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match self.view_mode {
            ViewMode::Results if self.results.is_empty() => String::new(),
            ViewMode::Results => format!("{} results for \"{}\"", self.results.len(), self.results_query),
            ViewMode::Favorites => match self.favorites.len() {
                1 => "1 favorite".to_string(),
                n => format!("{n} favorites"),
            },
        };

        HeaderInfo {
            title: "Book Finder".to_string(),
            subtitle,
        }
    }

    fn compute_content(&self, rows: usize, layout: &LayoutInfo) -> ContentState {
        if self.view_mode == ViewMode::Results && self.is_loading() {
            return ContentState::Loading(LOADING_MESSAGE.to_string());
        }

        let books = self.visible_books();
        if books.is_empty() {
            let (message, subtitle) = match self.view_mode {
                ViewMode::Results => (NO_RESULTS_MESSAGE, "Press / to edit the query"),
                ViewMode::Favorites => (NO_FAVORITES_MESSAGE, "Press f on a book to save it"),
            };
            return ContentState::Empty(EmptyState {
                message: message.to_string(),
                subtitle: subtitle.to_string(),
            });
        }

        let columns = layout.grid_columns;
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let total_rows = books.len().div_ceil(columns);
        let selected_row = self.selected_index.min(books.len() - 1) / columns;

        let mut first_row = selected_row.saturating_sub(visible_rows / 2);
        if first_row + visible_rows > total_rows {
            first_row = total_rows.saturating_sub(visible_rows);
        }

        let start = first_row * columns;
        let end = ((first_row + visible_rows) * columns).min(books.len());
        let card_width = (layout.content_width / columns).saturating_sub(CARD_INSET);

        let matcher = (self.view_mode == ViewMode::Results && !self.results_query.trim().is_empty())
            .then(|| SkimMatcherV2::default().ignore_case());

        ContentState::Cards(
            books[start..end]
                .iter()
                .enumerate()
                .map(|(offset, book)| self.compute_card(book, start + offset, card_width, matcher.as_ref()))
                .collect(),
        )
    }

    fn compute_card(
        &self,
        book: &BookRecord,
        index: usize,
        width: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let is_favorite = self.favorites.contains(&book.key);
        let title = truncate(book.display_title(), width);
        let mut title_len = title.chars().count();
        if title != book.display_title() && title_len > 3 {
            title_len -= 3;
        }

        let highlight_ranges = matcher
            .map(|m| self.compute_highlight_ranges(book.display_title(), m))
            .unwrap_or_default()
            .into_iter()
            .filter(|&(start, _)| start < title_len)
            .map(|(start, end)| (start, end.min(title_len)))
            .collect();

        CardItem {
            title,
            highlight_ranges,
            author_line: truncate(&format!("Author: {}", book.primary_author()), width),
            year_line: format!("Year: {}", book.year_label()),
            publisher_line: truncate(&format!("Publisher: {}", book.primary_publisher()), width),
            cover_url: truncate(
                &book.cover_url(&self.settings.cover_base, &self.settings.placeholder_cover),
                width,
            ),
            button_label: if is_favorite { "Remove Favorite" } else { "Add to Favorites" }.to_string(),
            is_favorite,
            is_selected: index == self.selected_index,
        }
    }

    /// Char ranges of `text` matched by the query of the shown results,
    /// consecutive indices merged.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.results_query.trim()) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end += 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(notice) = &self.notice {
            return Some(StatusLine {
                message: notice.clone(),
                is_error: true,
            });
        }

        if let Some(pending) = &self.pending {
            return Some(StatusLine {
                message: format!("Searching for \"{}\"...", pending.query),
                is_error: false,
            });
        }

        match &self.status {
            SearchStatus::Idle => None,
            SearchStatus::Ready {
                count,
                total_matches,
                fetched_at,
            } => {
                let time = fetched_at.format("%H:%M:%S");
                let message = match total_matches {
                    Some(total) => format!("Showing {count} of {total} matches, fetched {time} UTC"),
                    None => format!("Showing {count} books, fetched {time} UTC"),
                };
                Some(StatusLine {
                    message,
                    is_error: false,
                })
            }
            SearchStatus::Failed { reason } => {
                let message = if self.results.is_empty() {
                    format!("Search failed: {reason}")
                } else {
                    format!("Search failed: {reason} (showing previous results)")
                };
                Some(StatusLine {
                    message,
                    is_error: true,
                })
            }
        }
    }

    fn compute_footer(&self, layout: &LayoutInfo) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing => "Type to edit  Enter: search  Esc: done".to_string(),
            InputMode::Normal => {
                let view = match self.view_mode {
                    ViewMode::Results => "Tab: favorites",
                    ViewMode::Favorites => "Tab: results",
                };
                let sidebar = if layout.sidebar == SidebarPlacement::Docked {
                    ""
                } else {
                    "  s: sidebar"
                };
                format!("/: search  hjkl: move  f: favorite  {view}  t: theme{sidebar}  q: quit")
            }
        };

        FooterInfo { keybindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogPage;

    fn state_with_results(count: usize) -> AppState {
        let mut state = AppState::new(Settings::default(), CatalogClient::default());
        state.results = (0..count)
            .map(|i| BookRecord::new(format!("/works/OL{i}W"), format!("Book {i}")))
            .collect();
        state
    }

    #[test]
    fn layout_follows_pane_width() {
        let mut state = state_with_results(0);

        let wide = state.layout(140);
        assert_eq!(wide.sidebar, SidebarPlacement::Docked);
        assert_eq!(wide.content_col, SIDEBAR_WIDTH + 2);
        assert_eq!(wide.grid_columns, 3);

        assert_eq!(state.layout(80).sidebar, SidebarPlacement::Hidden);
        assert_eq!(state.layout(80).grid_columns, 2);
        assert_eq!(state.layout(40).grid_columns, 1);

        state.sidebar_open = true;
        assert_eq!(state.layout(80).sidebar, SidebarPlacement::Overlay);
        assert_eq!(state.layout(140).sidebar, SidebarPlacement::Docked);
    }

    #[test]
    fn selection_moves_by_grid_rows_and_stops_at_edges() {
        let mut state = state_with_results(5);
        state.set_viewport(24, 80);

        assert!(!state.move_selection(Direction::Up));
        assert!(state.move_selection(Direction::Down));
        assert_eq!(state.selected_index, 2);
        assert!(state.move_selection(Direction::Right));
        assert!(!state.move_selection(Direction::Down));
        assert!(state.move_selection(Direction::Left));
        assert!(state.move_selection(Direction::Down));
        assert_eq!(state.selected_index, 4);
        assert!(!state.move_selection(Direction::Right));
        assert!(!state.move_selection(Direction::Down));
    }

    #[test]
    fn newer_search_supersedes_pending_one() {
        let mut state = state_with_results(0);

        let (first, _) = state.begin_search("dune").unwrap();
        let (second, url) = state.begin_search("emma").unwrap();

        assert!(second > first);
        assert!(url.ends_with("title=emma"));
        assert!(state.take_pending(first).is_none());
        assert!(state.is_loading());
        assert_eq!(state.take_pending(second).unwrap().query, "emma");
        assert!(!state.is_loading());
    }

    #[test]
    fn blank_search_changes_nothing() {
        let mut state = state_with_results(3);
        assert!(state.begin_search("   ").is_none());
        assert!(!state.is_loading());
        assert_eq!(state.results.len(), 3);
    }

    #[test]
    fn content_shows_loading_then_empty_message() {
        let mut state = state_with_results(0);
        let (seq, _) = state.begin_search("zzzz").unwrap();
        assert_eq!(
            state.compute_viewmodel(24, 80).content,
            ContentState::Loading("Loading books...".into())
        );

        let search = state.take_pending(seq).unwrap();
        state.apply_results(
            search,
            CatalogPage {
                books: vec![],
                total_matches: Some(0),
            },
        );
        match state.compute_viewmodel(24, 80).content {
            ContentState::Empty(empty) => assert_eq!(empty.message, "No books found. Try a different search!"),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn cards_carry_labels_and_selection() {
        let mut state = state_with_results(2);
        state.favorites.toggle(&state.results[1].clone());
        state.selected_index = 1;

        let ContentState::Cards(cards) = state.compute_viewmodel(40, 80).content else {
            panic!("expected cards");
        };

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].author_line, "Author: Unknown");
        assert_eq!(cards[0].year_line, "Year: N/A");
        assert_eq!(cards[0].publisher_line, "Publisher: N/A");
        assert_eq!(cards[0].cover_url, truncate(PLACEHOLDER_COVER, 40 - CARD_INSET));
        assert_eq!(cards[0].button_label, "Add to Favorites");
        assert_eq!(cards[1].button_label, "Remove Favorite");
        assert!(cards[1].is_selected && !cards[0].is_selected);
    }

    #[test]
    fn title_matches_of_results_query_are_highlighted() {
        let mut state = state_with_results(0);
        state.results = vec![BookRecord::new("/works/OL1W", "The Dune Chronicles")];
        state.results_query = "dune".into();

        let ContentState::Cards(cards) = state.compute_viewmodel(24, 80).content else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].highlight_ranges, vec![(4, 8)]);
    }

    #[test]
    fn grid_window_follows_selection() {
        let mut state = state_with_results(20);
        state.selected_index = 19;

        let ContentState::Cards(cards) = state.compute_viewmodel(24, 80).content else {
            panic!("expected cards");
        };
        assert!(cards.iter().any(|card| card.is_selected));
        assert_eq!(cards.last().map(|c| c.title.as_str()), Some("Book 19"));
    }

    #[test]
    fn failure_status_mentions_kept_results() {
        let mut state = state_with_results(4);
        state.fail_search("catalog responded with HTTP 503");

        let status = state.compute_viewmodel(24, 80).status.unwrap();
        assert!(status.is_error);
        assert_eq!(
            status.message,
            "Search failed: catalog responded with HTTP 503 (showing previous results)"
        );
    }

    #[test]
    fn sidebar_lists_favorites_or_placeholder() {
        let mut state = state_with_results(1);
        state.sidebar_open = true;

        let sidebar = state.compute_viewmodel(24, 80).sidebar.unwrap();
        assert_eq!(sidebar.favorites_empty.as_deref(), Some("No favorites yet."));
        assert_eq!(sidebar.theme_label, "Dark");

        let book = state.results[0].clone();
        state.favorites.toggle(&book);
        state.theme = ThemeMode::Dark;
        let sidebar = state.compute_viewmodel(24, 80).sidebar.unwrap();
        assert_eq!(sidebar.favorites, vec!["Book 0".to_string()]);
        assert_eq!(sidebar.favorites_empty, None);
        assert_eq!(sidebar.theme_label, "Light");
    }
}
