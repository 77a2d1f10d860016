//! The article record and the field set requests may supply.
//!
//! An [`Article`] is what the store holds and what clients read back: a
//! `title` (the lookup key) and free-form `content`. Requests never hand an
//! `Article` over directly; they supply [`ArticleFields`], where each known
//! field is either present or not. Create and replace fill unsupplied fields
//! with empty text, partial update leaves them untouched. Unknown keys in a
//! request body are dropped at decode time and never reach storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::request::Request;

/// A stored article.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into() }
    }
}

/// The subset of article fields a request supplied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArticleFields {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ArticleFields {
    /// Reads the known fields from a request body.
    ///
    /// JSON and url-encoded form bodies are understood; without a telling
    /// content type JSON is tried first. A body that decodes to nothing
    /// usable supplies no fields.
    pub fn from_request(req: &Request) -> Self {
        let body = req.body();
        if body.is_empty() {
            return Self::default();
        }

        match req.content_type().as_deref() {
            Some("application/x-www-form-urlencoded") => Self::from_form(req.form()),
            Some("application/json") => Self::from_json(body).unwrap_or_else(|e| {
                warn!("ignoring undecodable json body: {e}");
                Self::default()
            }),
            _ => Self::from_json(body).unwrap_or_else(|_| Self::from_form(req.form())),
        }
    }

    /// Decodes a JSON body. A non-object document supplies no fields.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(map) = value else {
            return Ok(Self::default());
        };
        Ok(Self {
            title: map.get("title").and_then(field_text),
            content: map.get("content").and_then(field_text),
        })
    }

    /// Collects the known fields from decoded form pairs. The last
    /// occurrence of a repeated key wins.
    pub fn from_form(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut fields = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => fields.title = Some(value),
                "content" => fields.content = Some(value),
                _ => {}
            }
        }
        fields
    }

    /// A complete article for create and full replace: unsupplied fields
    /// become empty.
    pub fn into_article(self) -> Article {
        Article {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        }
    }

    /// Overwrites only the supplied fields of `article`.
    pub fn merge_into(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            article.content.clone_from(content);
        }
    }
}

/// Text form of a scalar; `null` and containers count as not supplied.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
