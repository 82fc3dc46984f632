//! Request-level logging, request IDs and parent trace extraction.

use std::time::{Duration, Instant};

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::{
    Request, handler,
    http::{HeaderMap, HeaderName, StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;
use uuid::Uuid;

use super::metrics;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Paths polled by infrastructure, served without a request span.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// Wraps every request in a span, tags it with a request id and records
/// latency metrics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
    propagate_parent: bool,
}

impl RequestLogging {
    pub(crate) fn new(slow_request_threshold: Duration, propagate_parent: bool) -> Self {
        Self {
            slow_request_threshold,
            propagate_parent,
        }
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if UNTRACED_PATHS.contains(&req.uri().path()) {
            ctrl.call_next(req, depot, res).await;

            return;
        }

        let started = Instant::now();
        let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
        set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = route_label(&path);
        let _in_flight = metrics::InFlightRequestGuard::track();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %format!("{method} {route}"),
            otel.kind = "server",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        if self.propagate_parent
            && let Some(parent) = extract_parent_context(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("failed to set parent context on request span: {source}");
        }

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = elapsed.as_millis();

        metrics::observe_request(&method, &route, status.as_u16(), elapsed.as_secs_f64());

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(status = status.as_u16(), %method, %path, %request_id, "server error response");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), %method, %path, %request_id, "client error response");
            }

            if elapsed > self.slow_request_threshold {
                warn!(
                    %method,
                    %path,
                    %request_id,
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "slow request detected"
                );
            }
        });
    }
}

fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(request_id, "could not encode request id for response header: {source}");
        }
    }
}

/// Path with identifiers collapsed, so metrics and span names stay low cardinality.
fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor(headers);

    global::get_text_map_propagator(|propagator| {
        // Fresh base context so requests without trace headers start a new trace.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
