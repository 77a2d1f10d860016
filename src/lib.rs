//! # wiki-api
//!
//! A small JSON API over a collection of wiki articles. Each article is a
//! `title` (the lookup key) and a `content` body.
//!
//! | Route | Success | Otherwise |
//! |---|---|---|
//! | `GET /articles` | 200, every article | 404 when empty |
//! | `POST /articles` | 200 `{message}` | |
//! | `DELETE /articles` | 204 | |
//! | `GET /articles/{title}` | 200, the article | 404 |
//! | `PUT /articles/{title}` | 200 `{message}` | 404 |
//! | `PATCH /articles/{title}` | 200 `{message}` | 404 |
//! | `DELETE /articles/{title}` | 200 `{message}` | 404 |
//!
//! Any store failure answers `500 {"error":"Internal Server Error"}`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wiki_api::{Server, app, store::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wiki_api::Error> {
//!     let router = app(Arc::new(MemoryStore::new()));
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).await?.serve(router).await
//! }
//! ```

mod error;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod article;
pub mod articles;
pub mod config;
pub mod handler;
pub mod health;
pub mod logging;
pub mod store;

use std::sync::Arc;

pub use article::{Article, ArticleFields};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::ArticleStore;

/// The complete service: article routes plus health probes, all backed by
/// `store`.
pub fn app<S: ArticleStore>(store: Arc<S>) -> Router {
    let router = articles::register(Router::new(), Arc::clone(&store));
    health::register(router, store)
}
