//! Liveness and readiness probes.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the article store serve requests? Failure → no traffic. |

use std::sync::Arc;

use tracing::warn;

use crate::handler::with_state;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;
use crate::store::ArticleStore;

/// Adds `/healthz` and `/readyz` to `router`.
pub fn register<S: ArticleStore>(router: Router, store: Arc<S>) -> Router {
    router
        .on(Method::Get, "/healthz", liveness)
        .on(Method::Get, "/readyz", with_state(store, readiness::<S>))
}

/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all,
/// it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` while the store answers its ping,
/// `503 Service Unavailable` otherwise.
pub async fn readiness<S: ArticleStore>(store: Arc<S>, _req: Request) -> Response {
    match store.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!("store not ready: {e}");
            Response::builder()
                .status(Status::ServiceUnavailable)
                .text("not ready")
        }
    }
}
