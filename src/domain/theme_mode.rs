//! Light/dark theme preference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary visual mode, persisted as `"light"` or `"dark"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Reads a persisted value. Anything other than `"dark"` is light.
    ///
    /// ```
    /// use bookmate::domain::ThemeMode;
    ///
    /// assert_eq!(ThemeMode::from_persisted(Some("dark")), ThemeMode::Dark);
    /// assert_eq!(ThemeMode::from_persisted(Some("purple")), ThemeMode::Light);
    /// assert_eq!(ThemeMode::from_persisted(None), ThemeMode::Light);
    /// ```
    #[must_use]
    pub fn from_persisted(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("dark") => Self::Dark,
            Some("light") | None => Self::Light,
            Some(other) => {
                tracing::warn!(value = %other, "unknown persisted theme, using light");
                Self::Light
            }
        }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Storage literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_is_identity() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn storage_literal_round_trips() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_persisted(Some(mode.as_str())), mode);
        }
    }
}
