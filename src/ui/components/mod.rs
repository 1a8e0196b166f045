//! Composable UI component renderers.
//!
//! - [`header`]: content title and result count
//! - [`grid`]: book cards
//! - [`empty`]: loading and empty-list messages
//! - [`status`]: search status below the grid
//! - [`sidebar`]: branding, theme switch, search box, favorites
//! - [`search`]: the search box itself
//! - [`footer`]: keybinding hints
//!
//! # Frame
//!
//! ```text
//! row 1           [blank]
//! row 2           [Header]
//! row 3           [Border]
//! rows 4..=R-3    [Cards / message]
//! row R-2         [Status]
//! row R-1         [Border, full width]
//! row R           [Footer, full width]
//! ```
//!
//! The content rows sit right of a docked sidebar, or span the pane when the
//! sidebar is hidden or overlaid.

mod empty;
mod footer;
mod grid;
mod header;
mod search;
mod sidebar;
mod status;

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ContentState, SidebarPlacement, UIViewModel};

use empty::render_message;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use sidebar::render_sidebar;
use status::render_status;

const HEADER_ROW: usize = 2;
const CONTENT_TOP: usize = 4;

/// Smallest pane that fits the chrome plus one card row.
const MIN_ROWS: usize = CARD_HEIGHT + 6;
const MIN_COLS: usize = 24;

fn fill(rows: std::ops::RangeInclusive<usize>, col: usize, width: usize, bg: &str) {
    let blank = " ".repeat(width);
    for row in rows {
        position_cursor(row, col);
        print!("{}{blank}{}", Theme::bg(bg), Theme::reset());
    }
}

/// Renders a horizontal border line at `row`, returning `row + 1`.
fn render_border(row: usize, col: usize, width: usize, theme: &Theme) -> usize {
    position_cursor(row, col);
    print!(
        "{}{}{}",
        Theme::paint(&theme.colors.border, &theme.colors.background),
        "─".repeat(width),
        Theme::reset()
    );
    row + 1
}

/// Renders one complete frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows < MIN_ROWS || cols < MIN_COLS {
        render_too_small(theme, rows, cols);
        return;
    }

    let layout = &vm.layout;
    let status_row = rows - 2;

    fill(1..=rows, 1, cols, &theme.colors.background);

    let mut row = render_header(HEADER_ROW, layout.content_col, layout.content_width, &vm.header, theme);
    row = render_border(row, layout.content_col, layout.content_width, theme);
    debug_assert_eq!(row, CONTENT_TOP);

    match &vm.content {
        ContentState::Loading(message) => {
            render_message(CONTENT_TOP, layout.content_col, layout.content_width, message, None, theme);
        }
        ContentState::Empty(empty) => render_message(
            CONTENT_TOP,
            layout.content_col,
            layout.content_width,
            &empty.message,
            Some(&empty.subtitle),
            theme,
        ),
        ContentState::Cards(cards) => render_grid(CONTENT_TOP, cards, layout, theme),
    }

    render_status(status_row, layout.content_col, layout.content_width, vm.status.as_ref(), theme);

    if layout.sidebar == SidebarPlacement::Overlay {
        let shaded = cols.saturating_sub(layout.sidebar_width);
        fill(1..=status_row, layout.sidebar_width + 1, shaded, &theme.colors.overlay_bg);
    }
    if let Some(sidebar) = &vm.sidebar {
        render_sidebar(sidebar, layout, status_row, theme);
    }

    let footer_row = render_border(rows - 1, 1, cols, theme);
    render_footer(footer_row, &vm.footer, theme, cols);
}

fn render_too_small(theme: &Theme, rows: usize, cols: usize) {
    fill(1..=rows, 1, cols, &theme.colors.background);
    position_cursor(rows.div_ceil(2).max(1), 1);
    print!(
        "{}{}{}",
        Theme::paint(&theme.colors.text_dim, &theme.colors.background),
        center("Pane too small", cols),
        Theme::reset()
    );
}
