//! Error reporting.

use std::error::Error;

use async_trait::async_trait;
use mockall::automock;

/// A failure that was handled locally but should still be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Where the failure happened, e.g. `"dispatch"`.
    pub context: &'static str,

    /// The error message including its source chain.
    pub message: String,
}

impl ErrorReport {
    /// Build a report from an error and its chain of sources.
    pub fn new(context: &'static str, error: &(dyn Error + 'static)) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();

        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self { context, message }
    }
}

#[automock]
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    /// Surface a handled failure.
    async fn report(&self, report: ErrorReport);
}

/// Reports errors as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

#[async_trait]
impl ErrorReporter for TracingErrorReporter {
    async fn report(&self, report: ErrorReport) {
        tracing::error!(context = report.context, error = %report.message, "reported error");
    }
}
