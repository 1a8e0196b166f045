//! Input and view mode types.
//!
//! `InputMode` decides how keys are interpreted: in `Normal` they are
//! commands, in `Editing` they go into the search box. `ViewMode` decides
//! which list the card grid shows.

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands (navigate, favorite, toggle theme, ...).
    #[default]
    Normal,

    /// Keys edit the search query; Enter submits, Esc leaves the box.
    Editing,
}

/// Which list the main area shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Results of the last completed search.
    #[default]
    Results,

    /// The persisted favorites.
    Favorites,
}

/// Direction of a selection move in the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Whether `key` reaches the key bindings: unmodified keys, plus characters
/// typed with Shift (`R`, `?`, `&`).
#[must_use]
pub fn is_plain_key(key: &KeyWithModifier) -> bool {
    key.has_no_modifiers()
        || (matches!(key.bare_key, BareKey::Char(_)) && key.key_modifiers.len() == 1 && key.has_modifiers(&[KeyModifier::Shift]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_characters_are_plain_keys() {
        assert!(is_plain_key(&KeyWithModifier::new(BareKey::Char('q'))));
        assert!(is_plain_key(&KeyWithModifier::new(BareKey::Char('R')).with_shift_modifier()));
        assert!(is_plain_key(&KeyWithModifier::new(BareKey::Char('?')).with_shift_modifier()));
        assert!(is_plain_key(&KeyWithModifier::new(BareKey::Char('&')).with_shift_modifier()));
    }

    #[test]
    fn other_modified_keys_are_ignored() {
        assert!(!is_plain_key(&KeyWithModifier::new(BareKey::Char('r')).with_ctrl_modifier()));
        assert!(!is_plain_key(
            &KeyWithModifier::new(BareKey::Char('?'))
                .with_shift_modifier()
                .with_alt_modifier()
        ));
        assert!(!is_plain_key(&KeyWithModifier::new(BareKey::Tab).with_shift_modifier()));
    }
}
