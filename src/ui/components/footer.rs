//! Footer help bar with centered keybinding hints.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered across the full pane width.
/// Hints wider than the pane are truncated.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(
        "{}{}",
        Theme::paint(&theme.colors.text_dim, &theme.colors.background),
        center(&footer.keybindings, cols)
    );
    print!("{}", Theme::reset());
    row + 1
}
