//! Card grid for results and favorites.
//!
//! Cards are laid out row-major in `layout.grid_columns` columns, each cell
//! `content_width / grid_columns` wide with a two-column gap:
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Harry Potter and the ... │
//! │ Author: J. K. Rowling    │
//! │ Year: 1997               │
//! │ Publisher: Bloomsbury    │
//! │ https://covers.openli... │
//! │  Add to Favorites        │
//! └──────────────────────────┘
//! ```

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{position_cursor, render_highlighted_text, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, LayoutInfo};

const CELL_GAP: usize = 2;

/// Renders `cards` starting at row `top`.
pub fn render_grid(top: usize, cards: &[CardItem], layout: &LayoutInfo, theme: &Theme) {
    let columns = layout.grid_columns.max(1);
    let cell_width = layout.content_width / columns;
    let box_width = cell_width.saturating_sub(CELL_GAP);

    for (i, card) in cards.iter().enumerate() {
        let row = top + (i / columns) * CARD_HEIGHT;
        let col = layout.content_col + 1 + (i % columns) * cell_width;
        render_card(row, col, box_width, card, theme);
    }
}

/// Style strings shared by every line of one card.
struct CardStyle {
    frame: String,
    base: String,
    dim: String,
    inner: usize,
}

impl CardStyle {
    fn new(card: &CardItem, width: usize, theme: &Theme) -> Self {
        let colors = &theme.colors;
        let (fg, bg) = if card.is_selected {
            (&colors.selection_fg, &colors.selection_bg)
        } else {
            (&colors.text_normal, &colors.surface)
        };
        let frame_fg = if card.is_selected { &colors.accent } else { &colors.border };
        let dim_fg = if card.is_selected { fg } else { &colors.text_dim };

        Self {
            frame: Theme::paint(frame_fg, bg),
            base: Theme::paint(fg, bg),
            dim: Theme::paint(dim_fg, bg),
            inner: width.saturating_sub(4),
        }
    }

    fn open(&self, row: usize, col: usize) {
        position_cursor(row, col);
        print!("{}│{} ", self.frame, self.base);
    }

    /// Pads the line after `used` columns of text and draws the right border.
    fn close(&self, used: usize) {
        let padding = self.inner.saturating_sub(used);
        print!("{}{}{} {}│{}", Theme::reset(), self.base, " ".repeat(padding), self.frame, Theme::reset());
    }

    fn text(&self, row: usize, col: usize, style: &str, text: &str) {
        let text = truncate(text, self.inner);
        self.open(row, col);
        print!("{style}{text}");
        self.close(text_width(&text));
    }
}

fn render_card(row: usize, col: usize, width: usize, card: &CardItem, theme: &Theme) {
    let colors = &theme.colors;
    let style = CardStyle::new(card, width, theme);
    let rule = "─".repeat(width.saturating_sub(2));

    position_cursor(row, col);
    print!("{}┌{rule}┐{}", style.frame, Theme::reset());

    let title_style = format!("{}{}", style.base, Theme::bold());
    style.open(row + 1, col);
    print!("{title_style}");
    render_highlighted_text(&card.title, &card.highlight_ranges, theme, &title_style);
    style.close(text_width(&card.title));

    style.text(row + 2, col, &style.base, &card.author_line);
    style.text(row + 3, col, &style.base, &card.year_line);
    style.text(row + 4, col, &style.dim, &card.publisher_line);
    style.text(row + 5, col, &style.dim, &card.cover_url);

    let (button_fg, button_bg) = if card.is_favorite {
        (&colors.favorite_fg, &colors.favorite_bg)
    } else {
        (&colors.button_fg, &colors.button_bg)
    };
    let label = truncate(&format!(" {} ", card.button_label), style.inner);
    style.open(row + 6, col);
    print!("{}{label}", Theme::paint(button_fg, button_bg));
    style.close(text_width(&label));

    position_cursor(row + 7, col);
    print!("{}└{rule}┘{}", style.frame, Theme::reset());
}
