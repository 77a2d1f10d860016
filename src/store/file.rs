//! Article collection persisted to a JSON file.
//!
//! The whole collection is one JSON array. It is read once on open and
//! rewritten after every mutation through a temporary file and a rename, so
//! a crash mid-write leaves the previous version in place. A mutation only
//! becomes visible once its write has succeeded.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::debug;

use super::{ArticleStore, Record, StoreError, UpdateResult, delete_in, replace_in, update_in};
use crate::article::{Article, ArticleFields};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: RwLock<Vec<Record>>,
}

impl FileStore {
    /// Opens the collection at `path`. A missing file is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), records = records.len(), "article file loaded");
        Ok(Self { path, records: RwLock::new(records) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `op` to a copy of the collection, persists the copy, then
    /// makes it current.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Vec<Record>) -> T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        let out = op(&mut next);
        if next != *records {
            self.persist(&next).await?;
            *records = next;
        }
        Ok(out)
    }

    async fn persist(&self, records: &[Record]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl ArticleStore for FileStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().map(|r| r.article.clone()).collect())
    }

    async fn find_one(&self, title: &str) -> Result<Option<Article>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.article.title == title).map(|r| r.article.clone()))
    }

    async fn insert_one(&self, article: Article) -> Result<(), StoreError> {
        self.mutate(|records| records.push(Record::new(article))).await
    }

    async fn replace_one(&self, title: &str, article: Article) -> Result<UpdateResult, StoreError> {
        self.mutate(|records| replace_in(records, title, article)).await
    }

    async fn update_one(&self, title: &str, fields: ArticleFields) -> Result<Option<Article>, StoreError> {
        self.mutate(|records| update_in(records, title, &fields)).await
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.mutate(|records| {
            let count = records.len() as u64;
            records.clear();
            count
        })
        .await
    }

    async fn delete_one(&self, title: &str) -> Result<u64, StoreError> {
        self.mutate(|records| delete_in(records, title)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let meta = tokio::fs::metadata(dir).await?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!("{} is not a directory", dir.display())))
        }
    }
}
