//! Subscriber setup.

use super::tracer;
use crate::infrastructure::get_data_dir;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "bookmate-otlp.json";

const SERVICE_NAME: &str = "BookMate";
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber for one component (`"plugin"` or
/// `"worker"`).
///
/// Returns `false` when tracing stays off: the data directory cannot be
/// created or a subscriber is already installed. Tracing is optional, so
/// neither case is an error.
pub fn init_tracing(trace_level: Option<&str>, component: &'static str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(trace_level.unwrap_or(DEFAULT_LEVEL)));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("bookmate.component", component),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok()
}
