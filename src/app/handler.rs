//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place state changes. It returns whether the
//! UI must be redrawn and the [`Action`]s the shim has to execute.
//!
//! ```text
//! key / host event ─▶ Event ─▶ handle_event ─▶ AppState
//!                                   │
//!                                   └─▶ Vec<Action> ─▶ web_request / worker / palette
//! ```

use super::modes::{Direction, InputMode, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::{BookmateError, Result};
use crate::domain::{BookRecord, Favorites, ThemeMode, Toggle};
use crate::storage::{FAVORITES_KEY, THEME_KEY};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The host answered the permission request.
    PermissionsResult { granted: bool },

    /// Reply from the storage worker.
    WorkerResponse(WorkerResponse),

    /// Focus the search box.
    EditQuery,
    /// Leave the search box without searching.
    StopEditing,
    /// Typed character while editing.
    Char(char),
    /// Delete the last query character while editing.
    Backspace,

    /// Submit the search form with `query`.
    SubmitSearch { query: String },

    /// Host HTTP response for the catalog request tagged `seq`.
    CatalogResponse { seq: u64, status: u16, body: Vec<u8> },

    /// The timer armed for request `seq` fired.
    SearchTimedOut { seq: u64 },

    ToggleTheme,
    ToggleFavorite(BookRecord),

    /// Open or close the sidebar (narrow panes).
    ToggleSidebar(bool),

    MoveSelection(Direction),
    ShowResults,
    ShowFavorites,

    /// Hide the plugin pane.
    CloseFocus,
}

impl Event {
    /// Variant name for spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PermissionsResult { .. } => "PermissionsResult",
            Self::WorkerResponse(_) => "WorkerResponse",
            Self::EditQuery => "EditQuery",
            Self::StopEditing => "StopEditing",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::SubmitSearch { .. } => "SubmitSearch",
            Self::CatalogResponse { .. } => "CatalogResponse",
            Self::SearchTimedOut { .. } => "SearchTimedOut",
            Self::ToggleTheme => "ToggleTheme",
            Self::ToggleFavorite(_) => "ToggleFavorite",
            Self::ToggleSidebar(_) => "ToggleSidebar",
            Self::MoveSelection(_) => "MoveSelection",
            Self::ShowResults => "ShowResults",
            Self::ShowFavorites => "ShowFavorites",
            Self::CloseFocus => "CloseFocus",
        }
    }
}

/// Applies `event` to `state`.
///
/// Returns `(should_render, actions)`. Catalog failures never surface as
/// `Err`: they are recorded in the search status and the previous results
/// stay on screen.
///
/// # Errors
///
/// Returns [`BookmateError::Storage`] if the favorites cannot be serialized
/// for persistence.
///
/// # Examples
///
/// ```
/// use bookmate::{handle_event, initialize, Action, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (render, actions) = handle_event(&mut state, &Event::SubmitSearch { query: "dune".into() })?;
///
/// assert!(render);
/// assert!(state.is_loading());
/// assert!(matches!(actions[0], Action::FetchCatalog { seq: 1, .. }));
/// # Ok::<(), bookmate::BookmateError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::PermissionsResult { granted } => Ok(handle_permissions(state, *granted)),
        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),

        Event::EditQuery => {
            state.input_mode = InputMode::Editing;
            state.sidebar_open = true;
            Ok((true, vec![]))
        }
        Event::StopEditing => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "query edited");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.query.pop();
            Ok((true, vec![]))
        }

        Event::SubmitSearch { query } => {
            state.query.clone_from(query);
            state.input_mode = InputMode::Normal;
            state.sidebar_open = false;

            let actions = start_search(state, query);
            if !actions.is_empty() {
                state.view_mode = ViewMode::Results;
            }
            Ok((true, actions))
        }
        Event::CatalogResponse { seq, status, body } => Ok((handle_catalog_response(state, *seq, *status, body), vec![])),
        Event::SearchTimedOut { seq } => {
            let Some(search) = state.take_pending(*seq) else {
                return Ok((false, vec![]));
            };
            tracing::warn!(seq, query = %search.query, "catalog request timed out");
            state.fail_search("request timed out");
            Ok((true, vec![]))
        }

        Event::ToggleTheme | Event::ToggleFavorite(_) if state.preferences_pending() => {
            tracing::debug!(event = event.name(), "preferences still loading, toggle ignored");
            Ok((false, vec![]))
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme, "theme toggled");
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::store_value(
                        THEME_KEY.to_string(),
                        state.theme.as_str().to_string(),
                    )),
                    Action::ApplyTheme(state.theme),
                ],
            ))
        }
        Event::ToggleFavorite(book) => {
            let outcome = state.favorites.toggle(book);
            tracing::debug!(key = %book.key, ?outcome, total = state.favorites.len(), "favorite toggled");

            if outcome == Toggle::Removed && state.view_mode == ViewMode::Favorites {
                state.clamp_selection();
            }

            let serialized = state
                .favorites
                .to_persisted()
                .map_err(|e| BookmateError::Storage(format!("cannot serialize favorites: {e}")))?;

            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::store_value(
                    FAVORITES_KEY.to_string(),
                    serialized,
                ))],
            ))
        }
        Event::ToggleSidebar(open) => {
            state.sidebar_open = *open;
            if !open {
                state.input_mode = InputMode::Normal;
            }
            Ok((true, vec![]))
        }

        Event::MoveSelection(direction) => Ok((state.move_selection(*direction), vec![])),
        Event::ShowResults => Ok((switch_view(state, ViewMode::Results), vec![])),
        Event::ShowFavorites => Ok((switch_view(state, ViewMode::Favorites), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Starts a search and returns the fetch action, nothing for a blank query.
fn start_search(state: &mut AppState, query: &str) -> Vec<Action> {
    let Some((seq, url)) = state.begin_search(query) else {
        tracing::debug!("blank query, search skipped");
        return vec![];
    };

    tracing::debug!(seq, url = %url, "catalog search started");
    vec![Action::FetchCatalog {
        seq,
        url,
        timeout_secs: state.settings.request_timeout_secs,
    }]
}

fn handle_catalog_response(state: &mut AppState, seq: u64, status: u16, body: &[u8]) -> bool {
    let Some(search) = state.take_pending(seq) else {
        tracing::debug!(seq, "discarding response of a superseded or abandoned search");
        return false;
    };

    match state.catalog.decode(status, body) {
        Ok(page) => {
            tracing::debug!(seq, query = %search.query, count = page.books.len(), "search results applied");
            state.apply_results(search, page);
        }
        Err(e) => {
            tracing::warn!(seq, query = %search.query, error = %e, "catalog search failed");
            state.fail_search(e.to_string());
        }
    }
    true
}

fn handle_permissions(state: &mut AppState, granted: bool) -> (bool, Vec<Action>) {
    if !granted {
        tracing::warn!("permissions denied");
        state.notice = Some("Permissions denied: searching and saving are unavailable".to_string());
        return (true, vec![]);
    }

    if state.preferences_requested {
        return (false, vec![]);
    }

    state.preferences_requested = true;
    tracing::debug!("permissions granted, loading preferences");
    (
        false,
        vec![Action::PostToWorker(WorkerMessage::load_values(vec![
            THEME_KEY.to_string(),
            FAVORITES_KEY.to_string(),
        ]))],
    )
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::ValuesLoaded { values } => {
            if state.preferences_loaded {
                tracing::debug!("preferences already applied, ignoring reload");
                return (false, vec![]);
            }

            state.theme = ThemeMode::from_persisted(values.get(THEME_KEY).map(String::as_str));
            state.favorites = Favorites::from_persisted(values.get(FAVORITES_KEY).map(String::as_str));
            tracing::debug!(theme = %state.theme, favorites = state.favorites.len(), "preferences loaded");

            (true, finish_startup(state))
        }
        WorkerResponse::ValueStored { key } => {
            tracing::debug!(key = %key, "preference persisted");
            (false, vec![])
        }
        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "storage worker error");
            let actions = if state.preferences_loaded {
                vec![]
            } else {
                finish_startup(state)
            };
            state.notice = Some(format!("Storage error: {message}"));
            (true, actions)
        }
    }
}

/// Applies the loaded (or default) theme and runs the initial search.
fn finish_startup(state: &mut AppState) -> Vec<Action> {
    state.preferences_loaded = true;

    let mut actions = vec![Action::ApplyTheme(state.theme)];
    let query = state.query.clone();
    actions.extend(start_search(state, &query));
    actions
}

fn switch_view(state: &mut AppState, view_mode: ViewMode) -> bool {
    if state.view_mode == view_mode {
        return false;
    }
    state.view_mode = view_mode;
    state.selected_index = 0;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Settings;
    use crate::catalog::CatalogClient;
    use std::collections::BTreeMap;

    fn new_state() -> AppState {
        AppState::new(Settings::default(), CatalogClient::default())
    }

    fn fetch_seq(actions: &[Action]) -> u64 {
        actions
            .iter()
            .find_map(|a| match a {
                Action::FetchCatalog { seq, .. } => Some(*seq),
                _ => None,
            })
            .expect("fetch action")
    }

    #[test]
    fn typing_only_edits_query_in_editing_mode() {
        let mut state = new_state();
        state.query.clear();

        assert_eq!(handle_event(&mut state, &Event::Char('x')).unwrap(), (false, vec![]));

        handle_event(&mut state, &Event::EditQuery).unwrap();
        for c in "emma".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Backspace).unwrap();

        assert_eq!(state.query, "emm");
        assert!(state.sidebar_open);
    }

    #[test]
    fn submit_closes_sidebar_and_requests_catalog() {
        let mut state = new_state();
        state.sidebar_open = true;
        state.input_mode = InputMode::Editing;

        let (render, actions) =
            handle_event(&mut state, &Event::SubmitSearch { query: "the hobbit".into() }).unwrap();

        assert!(render);
        assert!(!state.sidebar_open);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            actions,
            vec![Action::FetchCatalog {
                seq: 1,
                url: "https://openlibrary.org/search.json?title=the+hobbit".into(),
                timeout_secs: 10,
            }]
        );
    }

    #[test]
    fn blank_submit_still_closes_sidebar() {
        let mut state = new_state();
        state.sidebar_open = true;

        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch { query: " ".into() }).unwrap();

        assert!(actions.is_empty());
        assert!(!state.sidebar_open);
        assert!(!state.is_loading());
    }

    #[test]
    fn timeout_abandons_request() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch { query: "dune".into() }).unwrap();
        let seq = fetch_seq(&actions);

        assert_eq!(handle_event(&mut state, &Event::SearchTimedOut { seq }).unwrap(), (true, vec![]));
        assert!(!state.is_loading());
        assert!(matches!(state.status, crate::app::SearchStatus::Failed { ref reason } if reason == "request timed out"));

        let late = Event::CatalogResponse {
            seq,
            status: 200,
            body: br#"{"docs":[{"key":"/works/OL1W"}]}"#.to_vec(),
        };
        assert_eq!(handle_event(&mut state, &late).unwrap(), (false, vec![]));
        assert!(state.results.is_empty());
    }

    #[test]
    fn timer_of_answered_request_is_ignored() {
        let mut state = new_state();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch { query: "dune".into() }).unwrap();
        let seq = fetch_seq(&actions);

        let response = Event::CatalogResponse {
            seq,
            status: 200,
            body: br#"{"docs":[]}"#.to_vec(),
        };
        handle_event(&mut state, &response).unwrap();

        assert_eq!(handle_event(&mut state, &Event::SearchTimedOut { seq }).unwrap(), (false, vec![]));
    }

    #[test]
    fn toggle_theme_persists_and_applies() {
        let mut state = new_state();

        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();

        assert_eq!(state.theme, ThemeMode::Dark);
        assert_eq!(
            actions,
            vec![
                Action::PostToWorker(WorkerMessage::StoreValue {
                    key: "theme".into(),
                    value: "dark".into(),
                    trace_context: None,
                }),
                Action::ApplyTheme(ThemeMode::Dark),
            ]
        );
    }

    #[test]
    fn toggles_wait_for_requested_preferences() {
        let mut state = new_state();
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.theme, ThemeMode::Light);

        let (_, actions) = handle_event(&mut state, &Event::ToggleFavorite(BookRecord::new("/works/A", "A"))).unwrap();
        assert!(actions.is_empty());
        assert!(state.favorites.is_empty());

        let loaded = WorkerResponse::ValuesLoaded { values: BTreeMap::new() };
        handle_event(&mut state, &Event::WorkerResponse(loaded)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn permissions_load_preferences_once() {
        let mut state = new_state();

        let (_, first) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let (_, second) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        assert!(matches!(&first[..], [Action::PostToWorker(WorkerMessage::LoadValues { keys, .. })] if keys == &["theme", "favorites"]));
        assert!(second.is_empty());
    }

    #[test]
    fn loaded_preferences_apply_theme_and_search_default_query() {
        let mut state = new_state();
        let values = BTreeMap::from([("theme".to_string(), "dark".to_string())]);

        let (_, actions) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::ValuesLoaded { values })).unwrap();

        assert_eq!(actions[0], Action::ApplyTheme(ThemeMode::Dark));
        assert!(matches!(&actions[1], Action::FetchCatalog { url, .. } if url.ends_with("title=harry+potter")));
        assert!(state.preferences_loaded);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn worker_error_before_load_starts_with_defaults() {
        let mut state = new_state();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "load values: disk on fire".into(),
            }),
        )
        .unwrap();

        assert_eq!(actions[0], Action::ApplyTheme(ThemeMode::Light));
        assert!(state.is_loading());
        assert_eq!(state.notice.as_deref(), Some("Storage error: load values: disk on fire"));
    }

    #[test]
    fn removing_last_favorite_in_favorites_view_clamps_selection() {
        let mut state = new_state();
        let a = BookRecord::new("/works/A", "A");
        let b = BookRecord::new("/works/B", "B");
        handle_event(&mut state, &Event::ToggleFavorite(a)).unwrap();
        handle_event(&mut state, &Event::ToggleFavorite(b.clone())).unwrap();
        handle_event(&mut state, &Event::ShowFavorites).unwrap();
        state.selected_index = 1;

        handle_event(&mut state, &Event::ToggleFavorite(b)).unwrap();

        assert_eq!(state.selected_index, 0);
        assert_eq!(state.favorites.len(), 1);
    }
}
