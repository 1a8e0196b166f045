//! Shared text and cursor helpers.
//!
//! All widths are counted in chars, not bytes, so titles with accents or
//! non-Latin scripts are cut at character boundaries.

use crate::ui::theme::Theme;

const ELLIPSIS: &str = "...";

/// Moves the cursor to a 1-based row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of chars in `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` chars, ending with `...` when shortened.
///
/// ```
/// use bookmate::ui::helpers::truncate;
///
/// assert_eq!(truncate("Dune", 10), "Dune");
/// assert_eq!(truncate("The Left Hand of Darkness", 12), "The Left ...");
/// assert_eq!(truncate("Solaris", 2), "So");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }

    let kept: String = text.chars().take(width - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Truncates `text` to `width` and pads it with spaces to exactly `width`.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let padding = width.saturating_sub(text_width(&text));
    format!("{text}{}", " ".repeat(padding))
}

/// Centers `text` in `width` columns.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let left = width.saturating_sub(text_width(&text)) / 2;
    fit(&format!("{}{text}", " ".repeat(left)), width)
}

/// Greedy word wrap. Words longer than `width` are truncated.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        if line.is_empty() {
            line = word;
        } else if text_width(&line) + 1 + text_width(&word) <= width {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Splits `text` into `(segment, highlighted)` runs.
///
/// Ranges are char indices with exclusive end, sorted and non-overlapping.
/// Parts of a range past the end of `text` are ignored.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
        }
        pos = end;
    }
    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }

    segments
}

/// Prints `text` with its matching ranges in the highlight colors.
///
/// `base` is the escape sequence of the surrounding text and is re-applied
/// after every highlighted run.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) {
    let highlight = Theme::paint(
        &theme.colors.match_highlight_fg,
        &theme.colors.match_highlight_bg,
    );

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{highlight}{segment}{}{base}", Theme::reset());
        } else {
            print!("{segment}");
        }
    }
}
