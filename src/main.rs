//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the BookMate library and the Zellij plugin
//! API: it translates host events into [`Event`]s, runs
//! [`handle_event`] and performs the returned [`Action`]s.
//!
//! ```text
//! ┌──────────────────────────┐        ┌──────────────────────────┐
//! │  State (plugin)          │  JSON  │  BookmateWorker          │
//! │  keys, HTTP, timers, UI  │ ─────▶ │  preferences.json        │
//! │                          │ ◀───── │                          │
//! └──────────────────────────┘        └──────────────────────────┘
//! ```
//!
//! # Searches
//!
//! Every `FetchCatalog` action becomes a `web_request` whose context carries
//! the sequence number, plus a host timer. Timers are anonymous, so armed
//! sequence numbers are queued and popped in order; all requests share one
//! timeout, so the queue order is the firing order.
//!
//! # Keybindings
//!
//! Normal mode:
//! - `/` or `i`: edit the query
//! - `h`/`j`/`k`/`l` or arrows: move in the grid
//! - `f` or `Enter`: toggle favorite on the selected book
//! - `Tab`: switch between results and favorites
//! - `t`: toggle theme
//! - `s`: open/close the sidebar (narrow panes)
//! - `R`: search the current query again
//! - `Esc`: close the sidebar
//! - `q`: hide the plugin
//!
//! Editing mode:
//! - characters and `Backspace`: edit
//! - `Enter`: search
//! - `Esc`: stop editing

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use bookmate::app::is_plain_key;
use bookmate::ui::Palettes;
use bookmate::worker::{BookmateWorker, WorkerMessage, WorkerResponse};
use bookmate::{handle_event, Action, Config, Direction, Event, InputMode, ThemeMode, ViewMode};

register_plugin!(State);
register_worker!(BookmateWorker, bookmate_worker, BOOKMATE_WORKER);

const WORKER_NAME: &str = "bookmate";

/// Web request context key holding the search sequence number.
const SEQ_CONTEXT_KEY: &str = "bookmate_seq";

struct State {
    app: bookmate::AppState,
    palettes: Palettes,

    /// Palette currently drawn; changed only by `Action::ApplyTheme`.
    active_theme: ThemeMode,

    /// Sequence numbers of armed timeout timers, oldest first.
    timers: VecDeque<u64>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookmate::initialize(&Config::default()),
            palettes: Palettes::default(),
            active_theme: ThemeMode::default(),
            timers: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookmate::observability::init_tracing(config.trace_level.as_deref(), "plugin");

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(?config, "parsed configuration");

        self.app = bookmate::initialize(&config);
        self.palettes = Palettes::load(
            config.light_theme_file.as_deref(),
            config.dark_theme_file.as_deref(),
        );

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete, waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                Self::map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_request_event(status, body, &context)
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => self
                .timers
                .pop_front()
                .map(|seq| Event::SearchTimedOut { seq }),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Some(Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            }),
            _ => None,
        };
        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        bookmate::ui::render(&self.app, self.palettes.get(self.active_theme), rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(name, _) => format!("CustomMessage({name})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(_) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if !is_plain_key(key) {
            return None;
        }

        match self.app.input_mode {
            InputMode::Editing => match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch {
                    query: self.app.query.clone(),
                }),
                BareKey::Esc => Some(Event::StopEditing),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Char('/' | 'i') => Event::EditQuery,
                BareKey::Left | BareKey::Char('h') => Event::MoveSelection(Direction::Left),
                BareKey::Down | BareKey::Char('j') => Event::MoveSelection(Direction::Down),
                BareKey::Up | BareKey::Char('k') => Event::MoveSelection(Direction::Up),
                BareKey::Right | BareKey::Char('l') => Event::MoveSelection(Direction::Right),
                BareKey::Enter | BareKey::Char('f') => Event::ToggleFavorite(self.app.selected_book()?.clone()),
                BareKey::Tab => match self.app.view_mode {
                    ViewMode::Results => Event::ShowFavorites,
                    ViewMode::Favorites => Event::ShowResults,
                },
                BareKey::Char('t') => Event::ToggleTheme,
                BareKey::Char('s') => Event::ToggleSidebar(!self.app.sidebar_open),
                BareKey::Char('R') => Event::SubmitSearch {
                    query: self.app.query.clone(),
                },
                BareKey::Esc => Event::ToggleSidebar(false),
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn map_web_request_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(seq) = context.get(SEQ_CONTEXT_KEY).and_then(|s| s.parse().ok()) else {
            tracing::debug!("web request result without a search sequence");
            return None;
        };
        tracing::debug!(seq, status, body_len = body.len(), "catalog response received");
        Some(Event::CatalogResponse { seq, status, body })
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::FetchCatalog {
                seq,
                url,
                timeout_secs,
            } => {
                let context = BTreeMap::from([(SEQ_CONTEXT_KEY.to_string(), seq.to_string())]);
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context);
                set_timeout(f64::from(*timeout_secs));
                self.timers.push_back(*seq);
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::ApplyTheme(mode) => {
                tracing::debug!(theme = %mode, "palette applied");
                self.active_theme = *mode;
            }
            Action::CloseFocus => hide_self(),
        }
    }
}
