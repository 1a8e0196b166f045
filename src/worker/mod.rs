//! Background worker for preference storage.
//!
//! All file I/O happens on the worker thread so the plugin thread never
//! blocks on disk. The two sides talk through JSON-encoded messages.
//!
//! - `messages`: request/response types with trace context propagation
//! - `handler`: the worker and its message dispatch

pub mod handler;
pub mod messages;

pub use handler::BookmateWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
