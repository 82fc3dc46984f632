//! Tracing subscriber and telemetry lifecycle management.

use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use thiserror::Error;
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{
    logging::{LogFormat, LoggingConfig},
    observability::ObservabilityConfig,
};

use super::otel;

const NOISY_TARGETS: &str = "h2=warn,hyper=warn,hyper_util=warn,reqwest=warn,sqlx=warn,tonic=warn,opentelemetry=warn";

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Runtime observability state.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Initialise structured logging and optional OpenTelemetry export.
    pub(crate) fn init(
        logging: &LoggingConfig,
        observability: &ObservabilityConfig,
    ) -> Result<Self, ObservabilityError> {
        let tracer_provider = if observability.otel_enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(otel::build_tracer_provider(observability)?)
        } else {
            None
        };

        let subscriber = Subscriber {
            filter: env_filter(logging),
            tracer_provider: tracer_provider.as_ref(),
            service_name: &observability.otel_service_name,
        };

        match logging.log_format {
            LogFormat::Compact => subscriber.init(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )?,
            LogFormat::Json => subscriber.init(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )?,
        }

        Ok(Self { tracer_provider })
    }

    /// Flush and shutdown telemetry pipelines.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{NOISY_TARGETS}", logging.log_level)))
}

struct Subscriber<'a> {
    filter: EnvFilter,
    tracer_provider: Option<&'a SdkTracerProvider>,
    service_name: &'a str,
}

impl Subscriber<'_> {
    fn init<L>(self, fmt_layer: L) -> Result<(), ObservabilityError>
    where
        L: Layer<Registry> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry()
            .with(fmt_layer)
            .with(self.filter);

        match self.tracer_provider {
            Some(provider) => {
                let tracer = provider.tracer(self.service_name.to_owned());

                registry
                    .with(tracing_opentelemetry::layer().with_tracer(tracer))
                    .try_init()?;
            }
            None => registry.try_init()?,
        }

        Ok(())
    }
}
