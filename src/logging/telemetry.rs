use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource, runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServiceKind;

const METER_NAME: &str = "lender-backend";

/// Configuration for logging and OpenTelemetry export
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name reported on spans and metrics
    pub service_name: String,
    pub service_version: String,
    /// OTLP endpoint (e.g., "http://localhost:4317")
    pub otlp_endpoint: String,
    pub enable_metrics: bool,
    pub enable_tracing: bool,
    /// Filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: "http://localhost:4317".to_string(),
            enable_metrics: false,
            enable_tracing: false,
            log_level: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for `service`, overridden by the OTEL_* and RUST_LOG variables
    pub fn from_env(service: ServiceKind) -> Self {
        Self::from_lookup(service, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(service: ServiceKind, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).and_then(|value| value.parse::<bool>().ok());
        let mut config = Self::new().with_service_name(service.name());

        if let Some(endpoint) = lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            config.otlp_endpoint = endpoint;
        }
        if let Some(enable) = flag("OTEL_ENABLE_METRICS") {
            config.enable_metrics = enable;
        }
        if let Some(enable) = flag("OTEL_ENABLE_TRACING") {
            config.enable_tracing = enable;
        }
        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = level;
        }
        config
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    pub fn with_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    fn resource(&self) -> Resource {
        Resource::new(vec![
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                self.service_name.clone(),
            ),
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                self.service_version.clone(),
            ),
        ])
    }
}

fn install_tracer(config: &TelemetryConfig) -> Result<Tracer, Box<dyn std::error::Error>> {
    let tracer_provider = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(&config.otlp_endpoint),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(config.resource()),
        )
        .install_batch(runtime::Tokio)?;

    global::set_tracer_provider(tracer_provider.clone());

    Ok(tracer_provider.tracer(config.service_name.clone()))
}

fn install_meter_provider(config: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let meter_provider = opentelemetry_otlp::new_pipeline()
        .metrics(runtime::Tokio)
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(&config.otlp_endpoint),
        )
        .with_resource(config.resource())
        .with_period(std::time::Duration::from_secs(30))
        .build()?;

    global::set_meter_provider(meter_provider);
    Ok(())
}

/// Install the global tracing subscriber, plus OTLP trace and metric
/// export when enabled. Call once, from inside the tokio runtime.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let tracer = if config.enable_tracing {
        Some(install_tracer(&config)?)
    } else {
        None
    };

    if config.enable_metrics {
        install_meter_provider(&config)?;
    }

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(fmt_layer);

    if let Some(tracer) = tracer {
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry.with(telemetry_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    info!(
        service = %config.service_name,
        version = %config.service_version,
        otlp_endpoint = %config.otlp_endpoint,
        tracing = config.enable_tracing,
        metrics = config.enable_metrics,
        "Telemetry initialized"
    );

    Ok(())
}

/// Flush pending spans before exit
pub fn shutdown_telemetry() {
    info!("Shutting down telemetry...");
    global::shutdown_tracer_provider();
}

/// Create a counter on the global meter. A no-op instrument when metrics
/// export is disabled.
pub fn create_counter(name: &str, description: &str) -> opentelemetry::metrics::Counter<u64> {
    let meter = global::meter(METER_NAME);
    meter
        .u64_counter(name.to_string())
        .with_description(description.to_string())
        .init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, env!("CARGO_PKG_NAME"));
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert!(!config.enable_tracing);
        assert!(!config.enable_metrics);
    }

    #[test]
    fn test_from_lookup() {
        let env = HashMap::from([
            ("OTEL_ENABLE_TRACING", "true"),
            ("OTEL_ENABLE_METRICS", "yes"),
            ("RUST_LOG", "debug"),
        ]);

        let config = TelemetryConfig::from_lookup(ServiceKind::Dashboard, |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.service_name, "dashboard-backend");
        assert!(config.enable_tracing);
        // not a bool, keeps the default
        assert!(!config.enable_metrics);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.otlp_endpoint, "http://localhost:4317");
    }

    #[test]
    fn test_config_builder() {
        let config = TelemetryConfig::new()
            .with_service_name("test-service")
            .with_otlp_endpoint("http://localhost:4318")
            .with_metrics(false)
            .with_tracing(true)
            .with_log_level("debug");

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.otlp_endpoint, "http://localhost:4318");
        assert!(!config.enable_metrics);
        assert!(config.enable_tracing);
        assert_eq!(config.log_level, "debug");
    }
}
