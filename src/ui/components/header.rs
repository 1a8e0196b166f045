//! Content area title row.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the bold title on the left and the dim subtitle right-aligned,
/// filling `width` columns starting at `col`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, col: usize, width: usize, header: &HeaderInfo, theme: &Theme) -> usize {
    let colors = &theme.colors;
    let title = truncate(&format!(" {}", header.title), width);
    let room = width.saturating_sub(text_width(&title) + 1);
    let subtitle = if header.subtitle.is_empty() || room < 4 {
        String::new()
    } else {
        format!("{} ", truncate(&header.subtitle, room - 1))
    };
    let gap = width.saturating_sub(text_width(&title) + text_width(&subtitle));

    position_cursor(row, col);
    print!("{}", Theme::bg(&colors.background));
    print!("{}{}{title}", Theme::bold(), Theme::fg(&colors.header_fg));
    print!("{}{}", Theme::reset(), Theme::bg(&colors.background));
    print!("{}", " ".repeat(gap));
    print!("{}{subtitle}", Theme::fg(&colors.text_dim));
    print!("{}", Theme::reset());

    row + 1
}
