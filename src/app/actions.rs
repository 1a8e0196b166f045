//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O itself. It
//! returns a list of [`Action`]s that the plugin shim executes in order, which
//! keeps the controller testable without a Zellij host.

use crate::domain::ThemeMode;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue a catalog GET request.
    ///
    /// The shim tags the request with `seq` and arms a timer of
    /// `timeout_secs`; the response comes back as
    /// [`Event::CatalogResponse`](crate::app::Event::CatalogResponse) and an
    /// expired timer as [`Event::SearchTimedOut`](crate::app::Event::SearchTimedOut).
    FetchCatalog {
        seq: u64,
        url: String,
        timeout_secs: u32,
    },

    /// Send a storage request to the background worker.
    PostToWorker(WorkerMessage),

    /// Switch the rendered palette to the given theme.
    ApplyTheme(ThemeMode),

    /// Hide the plugin pane.
    CloseFocus,
}
