//! Per-request span with method, path, status, latency.

use std::future::Future;
use std::time::Instant;

use tracing::{Span, info, info_span};

use crate::response::Response;

pub(crate) fn request_span(method: &str, path: &str) -> Span {
    info_span!("http.request", %method, %path)
}

/// Awaits `inner` and records how it went. Run it inside [`request_span`].
///
/// Completion is always an `info` event, whatever the status. Failures are
/// reported where they happen, once.
pub(crate) async fn trace<F>(inner: F) -> Response
where
    F: Future<Output = Response>,
{
    let start = Instant::now();
    let response = inner.await;
    let status = u16::from(response.status_code());
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(status, latency_ms, "request completed");
    response
}
