//! Render-ready snapshot of the application state.
//!
//! Built by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Every string is final text and every
//! position is already computed; the renderer only decides colors.

/// Complete UI description for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Where the sidebar and the content area go.
    pub layout: LayoutInfo,

    /// Sidebar contents, `None` when the sidebar is hidden.
    pub sidebar: Option<SidebarInfo>,

    /// Title row of the content area.
    pub header: HeaderInfo,

    /// What the content area shows.
    pub content: ContentState,

    /// One-line status below the content, if any.
    pub status: Option<StatusLine>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// How the sidebar is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarPlacement {
    /// Permanent left column (wide panes).
    Docked,

    /// Drawn over a shaded content area (narrow panes, sidebar open).
    Overlay,

    /// Not drawn (narrow panes, sidebar closed).
    Hidden,
}

/// Column geometry of the frame. Columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    pub sidebar: SidebarPlacement,
    pub sidebar_width: usize,
    pub content_col: usize,
    pub content_width: usize,

    /// Number of card columns in the grid (1 to 3).
    pub grid_columns: usize,
}

/// Sidebar: branding, theme switch, greeting, search box and favorites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarInfo {
    pub title: String,

    /// Label of the theme switch, naming the theme it switches to.
    pub theme_label: String,

    pub greeting: String,
    pub search: SearchBarInfo,

    /// Favorite titles in insertion order.
    pub favorites: Vec<String>,

    /// Text shown instead of the list when there are no favorites.
    pub favorites_empty: Option<String>,
}

/// Search box state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Shown when the query is empty.
    pub placeholder: String,

    /// Whether keys currently edit the query (draws the cursor).
    pub is_editing: bool,
}

/// Content area title row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Right-aligned context, e.g. the result count.
    pub subtitle: String,
}

/// What the content area shows, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    /// A search is in flight.
    Loading(String),

    /// The visible list is empty.
    Empty(EmptyState),

    /// The card grid.
    Cards(Vec<CardItem>),
}

/// Message shown instead of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// One book card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub title: String,

    /// Char ranges of `title` matching the search query, `(start, end)`
    /// with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,

    pub author_line: String,
    pub year_line: String,
    pub publisher_line: String,
    pub cover_url: String,

    /// "Add to Favorites" or "Remove Favorite".
    pub button_label: String,

    pub is_favorite: bool,
    pub is_selected: bool,
}

/// Status line below the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,

    /// Failures are drawn in the error color.
    pub is_error: bool,
}

/// Footer help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
