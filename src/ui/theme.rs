//! Color palettes and ANSI escape sequence generation.
//!
//! BookMate ships a light and a dark palette, embedded at compile time from
//! `themes/light.toml` and `themes/dark.toml`. Either can be replaced by a
//! user file through the `light_theme_file` / `dark_theme_file` options.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-light"
//!
//! [colors]
//! background = "#f3f4f6"
//! surface = "#ffffff"
//! text_normal = "#1f2937"
//! text_dim = "#6b7280"
//! header_fg = "#111827"
//! border = "#d1d5db"
//! accent = "#2563eb"
//! selection_fg = "#111827"
//! selection_bg = "#dbeafe"
//! match_highlight_fg = "#1f2937"
//! match_highlight_bg = "#fde68a"
//! button_fg = "#374151"
//! button_bg = "#e5e7eb"
//! favorite_fg = "#ffffff"
//! favorite_bg = "#ef4444"
//! error_fg = "#dc2626"
//! overlay_bg = "#9ca3af"
//! ```
//!
//! # Example
//!
//! ```
//! use bookmate::ui::Theme;
//! use bookmate::ThemeMode;
//!
//! let theme = Theme::builtin(ThemeMode::Dark);
//! assert_eq!(theme.name, "dark");
//! assert!(Theme::fg(&theme.colors.accent).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::{BookmateError, Result, ThemeMode};
use crate::infrastructure::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LIGHT_TOML: &str = include_str!("../../themes/light.toml");
const DARK_TOML: &str = include_str!("../../themes/dark.toml");

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (e.g. `"#1f2937"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Page background behind the content area.
    pub background: String,

    /// Sidebar and card background.
    pub surface: String,

    pub text_normal: String,

    /// Secondary text: publisher, cover link, footer hints.
    pub text_dim: String,

    pub header_fg: String,
    pub border: String,

    /// Focused search box and selected card border.
    pub accent: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// "Add to Favorites" button.
    pub button_fg: String,
    pub button_bg: String,

    /// "Remove Favorite" button.
    pub favorite_fg: String,
    pub favorite_bg: String,

    pub error_fg: String,

    /// Shade drawn over the content while the sidebar overlays it.
    pub overlay_bg: String,
}

impl Theme {
    /// Returns the embedded palette for `mode`.
    ///
    /// # Panics
    ///
    /// Panics if an embedded palette fails to parse, which the unit tests
    /// rule out.
    #[must_use]
    pub fn builtin(mode: ThemeMode) -> Self {
        let source = match mode {
            ThemeMode::Light => LIGHT_TOML,
            ThemeMode::Dark => DARK_TOML,
        };
        toml::from_str(source).expect("built-in palette should always parse")
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookmateError::Theme`] if the file cannot be read or is not
    /// a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BookmateError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| BookmateError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`. Malformed input renders as magenta.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        match (hex.len(), u32::from_str_radix(hex, 16)) {
            (6, Ok(value)) => {
                let [_, r, g, b] = value.to_be_bytes();
                (r, g, b)
            }
            _ => (255, 0, 255),
        }
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Foreground plus background in one string.
    #[must_use]
    pub fn paint(fg: &str, bg: &str) -> String {
        format!("{}{}", Self::fg(fg), Self::bg(bg))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeMode::Light)
    }
}

/// The two palettes the theme switch alternates between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palettes {
    light: Theme,
    dark: Theme,
}

impl Palettes {
    /// Builds the palette pair, replacing a built-in palette with the user
    /// file configured for it. A file that fails to load is logged and the
    /// built-in palette is kept.
    #[must_use]
    pub fn load(light_file: Option<&str>, dark_file: Option<&str>) -> Self {
        Self {
            light: Self::load_one(ThemeMode::Light, light_file),
            dark: Self::load_one(ThemeMode::Dark, dark_file),
        }
    }

    fn load_one(mode: ThemeMode, file: Option<&str>) -> Theme {
        let Some(file) = file.map(str::trim).filter(|f| !f.is_empty()) else {
            return Theme::builtin(mode);
        };

        match Theme::from_file(expand_tilde(file)) {
            Ok(theme) => {
                tracing::info!(%mode, name = %theme.name, "loaded custom palette");
                theme
            }
            Err(e) => {
                tracing::warn!(%mode, error = %e, "custom palette unusable, using built-in");
                Theme::builtin(mode)
            }
        }
    }

    /// The palette to render `mode` with.
    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::load(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_palettes_parse() {
        assert_eq!(Theme::builtin(ThemeMode::Light).name, "light");
        assert_eq!(Theme::builtin(ThemeMode::Dark).name, "dark");
        assert_ne!(
            Theme::builtin(ThemeMode::Light).colors.background,
            Theme::builtin(ThemeMode::Dark).colors.background
        );
    }

    #[test]
    fn escapes_use_rgb_components() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("102030"), "\u{1b}[48;2;16;32;48m");
        assert_eq!(Theme::fg("#xyz"), "\u{1b}[38;2;255;0;255m");
    }

    #[test]
    fn custom_file_replaces_one_palette() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = LIGHT_TOML.replacen("name = \"light\"", "name = \"paper\"", 1);
        file.write_all(custom.as_bytes()).unwrap();

        let palettes = Palettes::load(file.path().to_str(), None);

        assert_eq!(palettes.get(ThemeMode::Light).name, "paper");
        assert_eq!(palettes.get(ThemeMode::Dark).name, "dark");
    }

    #[test]
    fn broken_file_falls_back_to_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n[colors]\nbackground = \"#000000\"\n")
            .unwrap();

        assert!(matches!(
            Theme::from_file(file.path()),
            Err(BookmateError::Theme(_))
        ));

        let palettes = Palettes::load(None, file.path().to_str());
        assert_eq!(palettes.get(ThemeMode::Dark).name, "dark");
    }
}
