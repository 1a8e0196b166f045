//! Sidebar: branding, theme switch, greeting, search box and favorites.
//!
//! ```text
//!  BookMate
//!
//!  Theme            [t] Dark
//!
//!  Hey Alex! Search books,
//!  explore details, and save
//!  your favorites.
//!
//!  ┌────────────────────────┐
//!  │ harry potter           │
//!  └────────────────────────┘
//!
//!  Favorites (2)
//!  • Dune
//!  • Solaris
//! ```

use super::search::render_search_bar;
use crate::ui::helpers::{fit, position_cursor, text_width, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LayoutInfo, SidebarInfo};

const TEXT_COL: usize = 3;
const MAX_GREETING_LINES: usize = 3;

/// Draws the sidebar over rows `1..=last_row` in the left
/// `layout.sidebar_width` columns, with a vertical border on the right.
pub fn render_sidebar(sidebar: &SidebarInfo, layout: &LayoutInfo, last_row: usize, theme: &Theme) {
    let colors = &theme.colors;
    let width = layout.sidebar_width;
    let text_width_max = width.saturating_sub(TEXT_COL + 2);
    let surface = Theme::bg(&colors.surface);

    for row in 1..=last_row {
        position_cursor(row, 1);
        print!("{surface}{}", " ".repeat(width.saturating_sub(1)));
        print!("{}│{}", Theme::paint(&colors.border, &colors.background), Theme::reset());
    }

    let line = |row: usize, fg: &str, text: &str| {
        position_cursor(row, TEXT_COL);
        print!("{}{}{}", Theme::paint(fg, &colors.surface), fit(text, text_width_max), Theme::reset());
    };

    let mut row = 2;
    position_cursor(row, TEXT_COL);
    print!("{}", Theme::bold());
    line(row, &colors.header_fg, &sidebar.title);
    row += 2;

    let switch = format!(" [t] {} ", sidebar.theme_label);
    line(row, &colors.text_normal, "Theme");
    position_cursor(row, (TEXT_COL + text_width_max).saturating_sub(text_width(&switch)));
    print!("{}{switch}{}", Theme::paint(&colors.button_fg, &colors.button_bg), Theme::reset());
    row += 2;

    for text in wrap(&sidebar.greeting, text_width_max).iter().take(MAX_GREETING_LINES) {
        line(row, &colors.text_dim, text);
        row += 1;
    }
    row += 1;

    row = render_search_bar(row, TEXT_COL, text_width_max, &sidebar.search, theme);
    row += 1;

    if row > last_row {
        return;
    }
    position_cursor(row, TEXT_COL);
    print!("{}", Theme::bold());
    line(row, &colors.header_fg, &format!("Favorites ({})", sidebar.favorites.len()));
    row += 1;

    if let Some(empty) = &sidebar.favorites_empty {
        if row <= last_row {
            line(row, &colors.text_dim, empty);
        }
        return;
    }

    let room = last_row.saturating_sub(row) + 1;
    let overflow = sidebar.favorites.len() > room;
    let shown = if overflow { room.saturating_sub(1) } else { room };

    for title in sidebar.favorites.iter().take(shown) {
        line(row, &colors.text_normal, &format!("• {}", truncate(title, text_width_max.saturating_sub(2))));
        row += 1;
    }
    if overflow {
        let more = sidebar.favorites.len() - shown;
        line(row, &colors.text_dim, &format!("+{more} more"));
    }
}
