//! Search box inside the sidebar.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const CURSOR: char = '▏';

/// Renders a 3-line bordered search box `width` columns wide at `col`.
///
/// The border uses the accent color while the query is being edited. A
/// query longer than the box shows its tail so the cursor stays visible.
///
/// # Returns
///
/// The next available row position (row + 3)
pub fn render_search_bar(row: usize, col: usize, width: usize, search: &SearchBarInfo, theme: &Theme) -> usize {
    let colors = &theme.colors;
    let inner_width = width.saturating_sub(2);
    let border = Theme::paint(
        if search.is_editing { &colors.accent } else { &colors.border },
        &colors.surface,
    );

    position_cursor(row, col);
    print!("{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let room = inner_width.saturating_sub(2);
    let (text, fg) = if search.query.is_empty() && !search.is_editing {
        (search.placeholder.chars().take(room).collect::<String>(), &colors.text_dim)
    } else {
        let mut text = search.query.clone();
        if search.is_editing {
            text.push(CURSOR);
        }
        let skip = text_width(&text).saturating_sub(room);
        (text.chars().skip(skip).collect::<String>(), &colors.text_normal)
    };
    let padding = inner_width.saturating_sub(text_width(&text) + 1);

    position_cursor(row + 1, col);
    print!("{border}│{} {text}", Theme::paint(fg, &colors.surface));
    print!("{}{border}│{}", " ".repeat(padding), Theme::reset());

    position_cursor(row + 2, col);
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
