//! HTTP status codes the service answers with, as a typed enum.
//!
//! ```rust
//! use wiki_api::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::NotFound)
//!     .json(&serde_json::json!({ "error": "No articles found" }));
//! ```

/// Status codes produced by the router, the handlers and the fallbacks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl Status {
    /// Responses with these codes never carry a body on the wire.
    pub(crate) fn forbids_body(self) -> bool {
        matches!(self, Self::NoContent)
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable  => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> Self {
        match s {
            Status::Ok                  => Self::OK,
            Status::NoContent           => Self::NO_CONTENT,
            Status::BadRequest          => Self::BAD_REQUEST,
            Status::NotFound            => Self::NOT_FOUND,
            Status::MethodNotAllowed    => Self::METHOD_NOT_ALLOWED,
            Status::InternalServerError => Self::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable  => Self::SERVICE_UNAVAILABLE,
        }
    }
}
