//! The document collection articles live in.
//!
//! [`ArticleStore`] is the whole contract the handlers rely on: find,
//! insert, replace, partial update and delete, each keyed by exact string
//! equality on `title`. Records keep insertion order and single-record
//! operations act on the first match. Every record carries a store-assigned
//! identity that never leaves the store.

mod file;
mod memory;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::article::{Article, ArticleFields};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Store failures. Callers do not distinguish between kinds; the cause is
/// kept for logging.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store cannot serve requests right now
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a full replace.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UpdateResult {
    /// Records whose title matched the filter (0 or 1)
    pub matched: u64,
    /// Records whose stored value actually changed
    pub modified: u64,
}

/// A stored article plus its identity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub(crate) struct Record {
    pub(crate) id: Uuid,
    #[serde(flatten)]
    pub(crate) article: Article,
}

impl Record {
    pub(crate) fn new(article: Article) -> Self {
        Self { id: Uuid::new_v4(), article }
    }
}

/// A collection of articles.
pub trait ArticleStore: Send + Sync + 'static {
    /// Every article, in insertion order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Article>, StoreError>> + Send;

    /// The first article titled `title`.
    fn find_one(&self, title: &str) -> impl Future<Output = Result<Option<Article>, StoreError>> + Send;

    /// Stores `article` under a fresh identity.
    fn insert_one(&self, article: Article) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Overwrites every field of the first article titled `title`.
    fn replace_one(
        &self,
        title: &str,
        article: Article,
    ) -> impl Future<Output = Result<UpdateResult, StoreError>> + Send;

    /// Merges `fields` into the first article titled `title`, returning the
    /// article as it was before the update.
    fn update_one(
        &self,
        title: &str,
        fields: ArticleFields,
    ) -> impl Future<Output = Result<Option<Article>, StoreError>> + Send;

    /// Removes every article, returning how many there were.
    fn delete_all(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Removes the first article titled `title`, returning 0 or 1.
    fn delete_one(&self, title: &str) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Checks the store can serve requests.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

// Operations shared by the collection implementations. Each works on the
// in-order record list and reports what changed.

pub(crate) fn replace_in(records: &mut [Record], title: &str, article: Article) -> UpdateResult {
    match records.iter_mut().find(|r| r.article.title == title) {
        Some(record) if record.article == article => UpdateResult { matched: 1, modified: 0 },
        Some(record) => {
            record.article = article;
            UpdateResult { matched: 1, modified: 1 }
        }
        None => UpdateResult::default(),
    }
}

pub(crate) fn update_in(records: &mut [Record], title: &str, fields: &ArticleFields) -> Option<Article> {
    let record = records.iter_mut().find(|r| r.article.title == title)?;
    let before = record.article.clone();
    fields.merge_into(&mut record.article);
    Some(before)
}

pub(crate) fn delete_in(records: &mut Vec<Record>, title: &str) -> u64 {
    match records.iter().position(|r| r.article.title == title) {
        Some(index) => {
            records.remove(index);
            1
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new(Article::new("Leaf", "first")),
            Record::new(Article::new("Leaf", "second")),
            Record::new(Article::new("Root", "under")),
        ]
    }

    #[test]
    fn replace_reports_match_and_modification() {
        let mut rs = records();
        assert_eq!(
            replace_in(&mut rs, "Leaf", Article::new("Leaf", "first")),
            UpdateResult { matched: 1, modified: 0 }
        );
        assert_eq!(
            replace_in(&mut rs, "Leaf", Article::new("Twig", "")),
            UpdateResult { matched: 1, modified: 1 }
        );
        assert_eq!(rs[0].article, Article::new("Twig", ""));
        assert_eq!(rs[1].article, Article::new("Leaf", "second"));
        assert_eq!(replace_in(&mut rs, "Bark", Article::default()), UpdateResult::default());
    }

    #[test]
    fn update_returns_previous_value() {
        let mut rs = records();
        let fields = ArticleFields { title: None, content: Some("changed".into()) };
        assert_eq!(update_in(&mut rs, "Root", &fields), Some(Article::new("Root", "under")));
        assert_eq!(rs[2].article, Article::new("Root", "changed"));
        assert_eq!(update_in(&mut rs, "Bark", &fields), None);
    }

    #[test]
    fn delete_removes_first_match_only() {
        let mut rs = records();
        assert_eq!(delete_in(&mut rs, "Leaf"), 1);
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].article, Article::new("Leaf", "second"));
        assert_eq!(delete_in(&mut rs, "Bark"), 0);
    }

    #[test]
    fn record_serializes_flat() {
        let record = Record::new(Article::new("Leaf", "green"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["title"], "Leaf");
        assert_eq!(value["content"], "green");
        assert!(value["id"].is_string());
    }
}
