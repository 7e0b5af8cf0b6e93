//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber with OpenTelemetry integration, wiring
//! the pipeline from `tracing` macros to the file exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the plugin data directory.
const TRACE_FILE: &str = "zibrary-otlp.json";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a pipeline that filters spans by the configured trace level,
/// exports them through OpenTelemetry, and writes OTLP JSON lines to a
/// rotating file in the plugin data directory.
///
/// Idempotent: only the first call per thread lifetime takes effect. Silently
/// does nothing when the data directory cannot be created, since
/// observability is optional.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "Zibrary",
    )]);

    let trace_file = data_dir.join(TRACE_FILE);
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("Zibrary");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
