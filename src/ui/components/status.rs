//! Status line below the card grid.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status message, or a blank line when there is none.
/// Errors use the error color.
pub fn render_status(row: usize, col: usize, width: usize, status: Option<&StatusLine>, theme: &Theme) {
    let colors = &theme.colors;
    let (text, fg) = match status {
        Some(status) if status.is_error => (format!(" {}", status.message), &colors.error_fg),
        Some(status) => (format!(" {}", status.message), &colors.text_dim),
        None => (String::new(), &colors.text_dim),
    };

    position_cursor(row, col);
    print!("{}{}", Theme::paint(fg, &colors.background), fit(&text, width));
    print!("{}", Theme::reset());
}
