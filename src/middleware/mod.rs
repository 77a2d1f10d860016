//! Middleware layer.
//!
//! Cross-cutting concerns applied to every request the router sees.
//! Today that is structured tracing: one `http.request` span per request
//! with method and path, and a completion event with status and latency.

mod trace;

pub(crate) use trace::{request_span, trace};
