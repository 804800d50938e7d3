//! Subscriber installation.

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name recorded on every exported span.
const SERVICE_NAME: &str = "Photodeck";

/// Trace file inside the data directory.
const TRACE_FILE_NAME: &str = "photodeck-otlp.json";

/// Installs the global subscriber with file-based OTLP export.
///
/// The level comes from `config.trace_level` and defaults to `info`. Spans
/// are written to `photodeck-otlp.json` in the data directory (see
/// [`get_data_dir`]).
///
/// Tracing is optional: if the data directory cannot be created, or a
/// subscriber is already installed, this does nothing.
///
/// # Example
///
/// ```rust,no_run
/// use photodeck::observability::init_tracing;
/// use photodeck::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("server.address", config.server_address.clone()),
    ]);

    let provider =
        tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
