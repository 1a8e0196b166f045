//! Storage worker.
//!
//! Runs on the thread Zellij spawns for `register_worker!` and serves
//! [`WorkerMessage`]s against a [`KeyValueStore`]. The store is opened lazily
//! on the first request.

use crate::domain::error::{BookmateError, Result};
use crate::infrastructure::paths;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, PREFERENCES_FILE};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state: the preferences store.
#[derive(Serialize, Deserialize, Default)]
pub struct BookmateWorker {
    #[serde(skip)]
    store: Option<Box<dyn KeyValueStore>>,
}

impl std::fmt::Debug for BookmateWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmateWorker")
            .field("store_open", &self.store.is_some())
            .finish()
    }
}

impl BookmateWorker {
    /// Creates a worker serving an already opened store.
    #[must_use]
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
        }
    }

    /// Opens the preferences file in the plugin data directory.
    ///
    /// Falls back to a volatile in-memory store when the file cannot be
    /// opened, so the session keeps working without persistence.
    fn open_default_store() -> Box<dyn KeyValueStore> {
        let path = paths::get_data_dir().join(PREFERENCES_FILE);
        match JsonFileStore::open(path.clone()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "preferences file unavailable, using memory store");
                Box::new(MemoryStore::default())
            }
        }
    }

    fn store(&mut self) -> &mut dyn KeyValueStore {
        self.store.get_or_insert_with(Self::open_default_store).as_mut()
    }

    /// Turns a store result into a response, logging the outcome.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "store operation succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_values(&mut self, keys: &[String]) -> WorkerResponse {
        let store = self.store();
        let result = keys.iter().try_fold(BTreeMap::new(), |mut values, key| {
            if let Some(value) = store.get(key)? {
                values.insert(key.clone(), value);
            }
            Ok::<_, BookmateError>(values)
        });

        Self::respond("load values", result, |values| {
            tracing::debug!(requested = keys.len(), found = values.len(), "values loaded");
            WorkerResponse::ValuesLoaded { values }
        })
    }

    fn handle_store_value(&mut self, key: String, value: &str) -> WorkerResponse {
        let result = self.store().set(&key, value);

        Self::respond("store value", result, |()| {
            tracing::debug!(key = %key, bytes = value.len(), "value stored");
            WorkerResponse::ValueStored { key }
        })
    }

    /// Re-attaches the sender's trace context on this thread.
    ///
    /// The returned guard must live for the duration of the request.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Serves one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", kind = message.kind()).entered();

        match message {
            WorkerMessage::LoadValues { keys, .. } => self.handle_load_values(&keys),
            WorkerMessage::StoreValue { key, value, .. } => self.handle_store_value(key, &value),
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

impl ZellijWorker<'_> for BookmateWorker {
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            crate::observability::init_tracing(None, "worker");
        }

        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed worker request");
                return;
            }
        };

        let response = self.handle_message(request);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(BookmateError::Storage("read-only".into()))
        }
    }

    #[test]
    fn load_values_omits_absent_keys() {
        let mut worker = BookmateWorker::with_store(MemoryStore::with_entries([("theme", "dark")]));

        let response = worker.handle_message(WorkerMessage::load_values(vec!["theme".into(), "favorites".into()]));

        let values = match response {
            WorkerResponse::ValuesLoaded { values } => values,
            other => panic!("unexpected response: {other:?}"),
        };
        assert_eq!(values.len(), 1);
        assert_eq!(values["theme"], "dark");
    }

    #[test]
    fn stored_value_is_visible_to_later_loads() {
        let mut worker = BookmateWorker::with_store(MemoryStore::default());

        assert_eq!(
            worker.handle_message(WorkerMessage::store_value("favorites".into(), "[]".into())),
            WorkerResponse::ValueStored { key: "favorites".into() }
        );

        let response = worker.handle_message(WorkerMessage::load_values(vec!["favorites".into()]));
        assert_eq!(
            response,
            WorkerResponse::ValuesLoaded {
                values: BTreeMap::from([("favorites".to_string(), "[]".to_string())])
            }
        );
    }

    #[test]
    fn store_failure_becomes_error_response() {
        let mut worker = BookmateWorker::with_store(ReadOnlyStore);

        let response = worker.handle_message(WorkerMessage::store_value("theme".into(), "dark".into()));

        let message = match response {
            WorkerResponse::Error { message } => message,
            other => panic!("unexpected response: {other:?}"),
        };
        assert!(message.starts_with("store value"));
        assert!(message.contains("read-only"));
    }
}
