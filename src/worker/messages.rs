//! Plugin ⇄ worker protocol.
//!
//! Requests and responses travel as JSON through Zellij's custom-message
//! channel. Each request carries the caller's trace context so the worker's
//! spans join the plugin-side trace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trace and parent span ids captured on the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Hex-encoded OpenTelemetry trace id (32 chars).
    pub trace_id: String,

    /// Hex-encoded id of the span that sent the message (16 chars).
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the active span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not recording, which is the normal case in unit tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request in the current trace.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_values(LoadValues { keys: Vec<String> }),
    store_value(StoreValue { key: String, value: String }),
}

/// Requests handled by the storage worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read several keys at once; absent keys are left out of the reply.
    LoadValues {
        keys: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Write one key, replacing any previous value.
    StoreValue {
        key: String,
        value: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the request, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadValues { trace_context, .. } | Self::StoreValue { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }

    /// Short name used for span and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadValues { .. } => "load_values",
            Self::StoreValue { .. } => "store_value",
        }
    }
}

/// Replies sent back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Values found for a `LoadValues` request.
    ValuesLoaded { values: BTreeMap<String, String> },

    /// A `StoreValue` request was written to disk.
    ValueStored { key: String },

    /// The request failed; the store is unchanged.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_leave_trace_context_empty_without_otel_layer() {
        let message = WorkerMessage::store_value("theme".into(), "dark".into());
        assert_eq!(message.trace_context(), None);
        assert_eq!(message.kind(), "store_value");
    }

    #[test]
    fn absent_trace_context_is_not_serialized() {
        let json = serde_json::to_string(&WorkerMessage::load_values(vec!["theme".into()])).unwrap();
        assert_eq!(json, r#"{"LoadValues":{"keys":["theme"]}}"#);

        let parsed: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, WorkerMessage::LoadValues { ref keys, .. } if keys == &["theme"]));
    }
}
