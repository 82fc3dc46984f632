//! Tracing Export Config

use std::time::Duration;

use clap::Args;

/// Trace export and request logging settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans to an OTLP collector
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces started by the caller's `traceparent` header
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = "http://localhost:4317")]
    pub otel_exporter_otlp_endpoint: String,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_exporter_otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "jobsender-json")]
    pub otel_service_name: String,

    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_deployment_environment: String,

    /// Fraction of root traces to sample, between 0 and 1
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this many milliseconds are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 5_000)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }

    #[must_use]
    pub fn exporter_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_exporter_otlp_timeout_seconds)
    }

    /// Sample ratio clamped into `[0, 1]`; `NaN` samples everything.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.otel_trace_sample_ratio.is_nan() {
            return 1.0;
        }

        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    fn with_ratio(ratio: &str) -> ObservabilityConfig {
        let flag = format!("--otel-trace-sample-ratio={ratio}");

        Harness::parse_from(["harness", flag.as_str()]).observability
    }

    #[test]
    fn sample_ratio_is_clamped_into_unit_range() {
        assert!((with_ratio("1.5").sample_ratio() - 1.0).abs() < f64::EPSILON, "above range");
        assert!(with_ratio("-0.5").sample_ratio().abs() < f64::EPSILON, "below range");
        assert!((with_ratio("NaN").sample_ratio() - 1.0).abs() < f64::EPSILON, "not a number");
    }

    #[test]
    fn negative_sample_ratio_parses_as_a_value() -> TestResult {
        let harness = Harness::try_parse_from(["harness", "--otel-trace-sample-ratio=-0.5"])?;

        assert!(
            (harness.observability.otel_trace_sample_ratio + 0.5).abs() < f64::EPSILON,
            "negative ratio should reach the config unchanged"
        );

        Ok(())
    }

    #[test]
    fn slow_request_threshold_reads_milliseconds() {
        let config =
            Harness::parse_from(["harness", "--slow-request-threshold-ms", "250"]).observability;

        assert_eq!(config.slow_request_threshold(), Duration::from_millis(250));
    }
}
