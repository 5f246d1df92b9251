//! Logging and optional OpenTelemetry export
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `fruits=info,tower_http=info`)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (e.g., http://localhost:4317);
//!   only honoured when built with the `telemetry` feature
//! - `OTEL_SERVICE_NAME`: Service name (default: fruits-server)

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "fruits=info,tower_http=info";

/// Install the global subscriber. `log_format` is `json` or `pretty`.
pub fn init_tracing(log_format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let fmt_layer = match log_format {
        // Production: JSON structured logging
        "json" => fmt::layer().json().boxed(),
        // Development: Pretty formatting with colors
        _ => fmt::layer().pretty().boxed(),
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "telemetry")]
    let registry = registry.with(otel::layer()?);

    registry
        .try_init()
        .context("Failed to install tracing subscriber")?;

    #[cfg(not(feature = "telemetry"))]
    if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        tracing::warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
    }

    Ok(())
}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::Result;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    /// OTLP export layer, or `None` when no endpoint is configured
    pub fn layer<S>() -> Result<Option<OpenTelemetryLayer<S, Tracer>>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
            return Ok(None);
        };
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "fruits-server".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()?;
        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .build();
        let tracer = provider.tracer(service_name);
        opentelemetry::global::set_tracer_provider(provider);

        Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer)))
    }
}
