//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which points at the cwd of
//! the last focused terminal (usually the home directory).

use std::path::PathBuf;

/// Directory holding `preferences.json` and the trace file:
/// `/host/.local/share/zellij/bookmate`.
///
/// ```
/// use bookmate::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("zellij/bookmate"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookmate")
}

/// Maps a `~`-prefixed path to its sandbox location under `/host`.
///
/// ```
/// use bookmate::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/paper.toml"), "/host/themes/paper.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/bookmate.toml"), "/etc/bookmate.toml");
/// assert_eq!(expand_tilde("~alex/x"), "~alex/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
