//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path,
//! you get a handler; a path nobody registered gets a JSON `404`, and a
//! registered path hit with the wrong method gets a JSON `405`. `HEAD`
//! and `OPTIONS` are answered for every registered path.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::{Match, Router as MatchitRouter};
use percent_encoding::percent_decode_str;
use tracing::{Instrument, error};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves
    /// them:
    ///
    /// ```rust
    /// # use wiki_api::{Method, Request, Response, Router};
    /// # async fn get_article(_: Request) -> Response { Response::text("") }
    /// # async fn create_article(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/articles/{title}", get_article)
    ///     .on(Method::Post, "/articles",         create_article);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Routes one request and produces one response.
    ///
    /// The handler runs in its own task: a handler that panics is logged
    /// once and answered with `500`, so every request gets a response.
    /// `HEAD` runs the `GET` handler and answers without a body. One
    /// trailing slash is ignored (`/articles/` routes as `/articles`).
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let span = middleware::request_span(parts.method.as_str(), parts.uri.path());
        let path = trim_trailing_slash(parts.uri.path()).to_owned();

        let dispatched = async {
            let Ok(method) = Method::try_from(&parts.method) else {
                return self.miss(None, &path);
            };
            let Some((handler, params)) = self.lookup(method, &path) else {
                return self.miss(Some(method), &path);
            };

            let req = Request::new(parts.headers, body, params);
            let mut response = match tokio::spawn(handler.call(req).in_current_span()).await {
                Ok(response) => response,
                Err(e) => {
                    error!("handler failed: {e}");
                    Response::error(Status::InternalServerError, "Internal Server Error")
                }
            };
            if method == Method::Head {
                response.body = Bytes::new();
            }
            response
        };

        middleware::trace(dispatched).instrument(span).await
    }

    fn lookup(&self, method: Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let matched = self.route(method, path)?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    /// Finds the route for `method`, falling back to `GET` for `HEAD`.
    fn route<'p>(&self, method: Method, path: &'p str) -> Option<Match<'_, 'p, &BoxedHandler>> {
        let found = self.routes.get(&method).and_then(|tree| tree.at(path).ok());
        match (found, method) {
            (None, Method::Head) => self.route(Method::Get, path),
            (found, _) => found,
        }
    }

    /// Methods with a route matching `path`, in wire-name order.
    fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|&m| self.route(m, path).is_some())
            .collect()
    }

    /// Answers a request no handler took: `OPTIONS` lists the allowed
    /// methods, a known path is `405`, anything else `404`.
    fn miss(&self, method: Option<Method>, path: &str) -> Response {
        let allowed = self.allowed(path);
        if allowed.is_empty() {
            return Response::error(Status::NotFound, "Not Found");
        }
        let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
        if method == Some(Method::Options) {
            return Response::builder().header("allow", &allow).text(allow.clone());
        }
        Response::builder()
            .status(Status::MethodNotAllowed)
            .header("allow", &allow)
            .json(&serde_json::json!({ "error": "Method Not Allowed" }))
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
