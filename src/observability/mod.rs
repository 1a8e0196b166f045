//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → bookmate-otlp.json
//! ```
//!
//! Each exported batch is one line of OTLP JSON in
//! `~/.local/share/zellij/bookmate/bookmate-otlp.json`. The file rotates at
//! 10 MB keeping three numbered backups.
//!
//! The plugin and its worker run in separate WASM instances, so each calls
//! [`init_tracing`] once with its own component name; the worker links its
//! spans to the plugin's through the trace context carried by
//! [`WorkerMessage`](crate::worker::WorkerMessage).
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the
//! `trace_level` option, otherwise `info`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
