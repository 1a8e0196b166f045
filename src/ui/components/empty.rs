//! Centered message shown instead of cards.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;

/// Rows between the top of the content area and the message.
const MESSAGE_OFFSET: usize = 2;

/// Renders `message` and an optional dim `subtitle` centered in the content
/// area that starts at `top`.
pub fn render_message(
    top: usize,
    col: usize,
    width: usize,
    message: &str,
    subtitle: Option<&str>,
    theme: &Theme,
) {
    let colors = &theme.colors;
    let row = top + MESSAGE_OFFSET;

    position_cursor(row, col);
    print!(
        "{}{}{}",
        Theme::bold(),
        Theme::paint(&colors.text_normal, &colors.background),
        center(message, width)
    );
    print!("{}", Theme::reset());

    if let Some(subtitle) = subtitle {
        position_cursor(row + 1, col);
        print!(
            "{}{}",
            Theme::paint(&colors.text_dim, &colors.background),
            center(subtitle, width)
        );
        print!("{}", Theme::reset());
    }
}
