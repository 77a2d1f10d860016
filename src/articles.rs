//! The `/articles` resource.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /articles` | [`list`] |
//! | `POST /articles` | [`create`] |
//! | `DELETE /articles` | [`delete_all`] |
//! | `GET /articles/{title}` | [`get`] |
//! | `PUT /articles/{title}` | [`replace`] |
//! | `PATCH /articles/{title}` | [`update`] |
//! | `DELETE /articles/{title}` | [`delete`] |
//!
//! Each handler makes exactly one store call and maps its outcome to one
//! response. Failures travel as [`ArticleError`], which is logged and turned
//! into a response in a single place.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::article::ArticleFields;
use crate::handler::with_state;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{ArticleStore, StoreError};

pub const NOT_FOUND: &str = "No articles found";
pub const INTERNAL: &str = "Internal Server Error";
pub const SAVED: &str = "Article saved successfully";
pub const UPDATED: &str = "Article updated successfully";
pub const DELETED_ALL: &str = "Successfully deleted all articles";

/// Why an article operation did not succeed.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// Nothing matched (a single title, or the whole collection)
    #[error("No articles found")]
    NotFound,

    /// The store call itself failed
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::error(Status::NotFound, NOT_FOUND),
            Self::Store(cause) => {
                error!(%cause, "article store call failed");
                Response::error(Status::InternalServerError, INTERNAL)
            }
        }
    }
}

type Outcome = Result<Response, ArticleError>;

/// Adds the article routes to `router`, all sharing `store`.
pub fn register<S: ArticleStore>(router: Router, store: Arc<S>) -> Router {
    router
        .on(Method::Get,    "/articles",         with_state(Arc::clone(&store), list::<S>))
        .on(Method::Post,   "/articles",         with_state(Arc::clone(&store), create::<S>))
        .on(Method::Delete, "/articles",         with_state(Arc::clone(&store), delete_all::<S>))
        .on(Method::Get,    "/articles/{title}", with_state(Arc::clone(&store), get::<S>))
        .on(Method::Put,    "/articles/{title}", with_state(Arc::clone(&store), replace::<S>))
        .on(Method::Patch,  "/articles/{title}", with_state(Arc::clone(&store), update::<S>))
        .on(Method::Delete, "/articles/{title}", with_state(store, delete::<S>))
}

fn title_param(req: &Request) -> String {
    req.param("title").unwrap_or_default().to_owned()
}

fn message(text: &str) -> Response {
    Response::json(&json!({ "message": text }))
}

// GET /articles
pub async fn list<S: ArticleStore>(store: Arc<S>, _req: Request) -> Outcome {
    let articles = store.find_all().await?;
    if articles.is_empty() {
        warn!("No articles found");
        return Err(ArticleError::NotFound);
    }
    info!(count = articles.len(), "Articles found");
    Ok(Response::json(&articles))
}

// POST /articles → 200, not 201
pub async fn create<S: ArticleStore>(store: Arc<S>, req: Request) -> Outcome {
    let article = ArticleFields::from_request(&req).into_article();
    let title = article.title.clone();
    store.insert_one(article).await?;
    info!(%title, "Article saved successfully");
    Ok(message(SAVED))
}

// DELETE /articles → 204; the message never reaches the wire
pub async fn delete_all<S: ArticleStore>(store: Arc<S>, _req: Request) -> Outcome {
    let count = store.delete_all().await?;
    info!("Successfully deleted {count} articles");
    Ok(Response::builder()
        .status(Status::NoContent)
        .json(&json!({ "message": DELETED_ALL })))
}

// GET /articles/{title}
pub async fn get<S: ArticleStore>(store: Arc<S>, req: Request) -> Outcome {
    let title = title_param(&req);
    match store.find_one(&title).await? {
        Some(article) => {
            info!(%title, "Article found");
            Ok(Response::json(&article))
        }
        None => {
            warn!("{title} article was not found");
            Err(ArticleError::NotFound)
        }
    }
}

// PUT /articles/{title}: full replace, unsupplied fields become empty
pub async fn replace<S: ArticleStore>(store: Arc<S>, req: Request) -> Outcome {
    let title = title_param(&req);
    let article = ArticleFields::from_request(&req).into_article();
    let result = store.replace_one(&title, article).await?;
    if result.modified > 0 {
        info!(%title, "Article updated successfully");
        return Ok(message(UPDATED));
    }
    if result.matched > 0 {
        warn!(%title, "replacement left {title} unchanged");
    } else {
        warn!("{title} article was not found");
    }
    Err(ArticleError::NotFound)
}

// PATCH /articles/{title}: only supplied fields change
pub async fn update<S: ArticleStore>(store: Arc<S>, req: Request) -> Outcome {
    let title = title_param(&req);
    let fields = ArticleFields::from_request(&req);
    match store.update_one(&title, fields).await? {
        Some(_) => {
            info!(%title, "Article updated successfully");
            Ok(message(UPDATED))
        }
        None => {
            warn!("{title} article was not found");
            Err(ArticleError::NotFound)
        }
    }
}

// DELETE /articles/{title}
pub async fn delete<S: ArticleStore>(store: Arc<S>, req: Request) -> Outcome {
    let title = title_param(&req);
    if store.delete_one(&title).await? > 0 {
        let text = format!("Successfully deleted the article {title}");
        info!("{text}");
        Ok(message(&text))
    } else {
        warn!("{title} article was not found");
        Err(ArticleError::NotFound)
    }
}
