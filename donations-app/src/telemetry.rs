//! OpenTelemetry export (spans and HTTP metrics) over OTLP/gRPC.

use std::env;

use opentelemetry::global;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};

/// Env var that switches OTLP export on.
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Installed providers, kept so they can be flushed on shutdown.
pub struct Telemetry {
    pub tracer: sdktrace::Tracer,
    tracer_provider: sdktrace::SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Telemetry {
    /// Sets up OTLP export when a collector endpoint is configured.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Option<Self>> {
        if lookup(OTLP_ENDPOINT_VAR).is_none_or(|endpoint| endpoint.trim().is_empty()) {
            return Ok(None);
        }

        global::set_text_map_propagator(TraceContextPropagator::new());

        // Use gRPC exporter with batch processing (non-blocking)
        let span_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()?;
        let tracer_provider = sdktrace::SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .build();
        global::set_tracer_provider(tracer_provider.clone());

        // Picked up by the router's HTTP metrics layer
        let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .build()?;
        let meter_provider = SdkMeterProvider::builder()
            .with_periodic_exporter(metric_exporter)
            .build();
        global::set_meter_provider(meter_provider.clone());

        use opentelemetry::trace::TracerProvider as _;
        Ok(Some(Self {
            tracer: tracer_provider.tracer("donations-relay"),
            tracer_provider,
            meter_provider,
        }))
    }

    /// Flushes pending spans and metrics.
    pub fn shutdown(self) {
        if let Err(e) = self.tracer_provider.shutdown() {
            tracing::warn!("Failed to flush traces: {}", e);
        }
        if let Err(e) = self.meter_provider.shutdown() {
            tracing::warn!("Failed to flush metrics: {}", e);
        }
    }
}
