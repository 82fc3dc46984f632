//! Structured logging, trace export and HTTP metrics.

mod init;
mod metrics;
mod otel;
mod request;

pub(crate) use init::{Observability, ObservabilityError};
pub(crate) use metrics::metrics_handler;
pub(crate) use request::RequestLogging;
