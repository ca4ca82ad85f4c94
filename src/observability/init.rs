//! Subscriber setup: `tracing` → OpenTelemetry → trace file.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "storefinder-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to the trace file.
///
/// The filter is `config.trace_level`, or `info`. Spans are written to
/// [`TRACE_FILE`] in the data directory, tagged with the configured
/// vertical, locale and environment.
///
/// Returns the trace file path, or `None` when the data directory cannot be
/// created or a global subscriber is already installed. Tracing is optional,
/// so neither case is an error.
///
/// ```rust,no_run
/// use storefinder::observability::init_tracing;
/// use storefinder::Config;
///
/// let config = Config {
///     trace_level: Some("storefinder=debug".to_string()),
///     ..Config::default()
/// };
/// if let Some(path) = init_tracing(&config) {
///     tracing::info!(path = %path.display(), "tracing enabled");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", tracer::SCOPE_NAME),
        KeyValue::new("storefinder.vertical", config.vertical_key.clone()),
        KeyValue::new("storefinder.locale", config.locale.clone()),
        KeyValue::new("storefinder.environment", format!("{:?}", config.environment)),
    ]);

    let trace_file = data_dir.join(TRACE_FILE);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE_NAME));

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
