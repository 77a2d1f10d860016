//! In-memory article collection.

use tokio::sync::RwLock;

use super::{ArticleStore, Record, StoreError, UpdateResult, delete_in, replace_in, update_in};
use crate::article::{Article, ArticleFields};

/// Articles held in process memory. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().map(|r| r.article.clone()).collect())
    }

    async fn find_one(&self, title: &str) -> Result<Option<Article>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.article.title == title).map(|r| r.article.clone()))
    }

    async fn insert_one(&self, article: Article) -> Result<(), StoreError> {
        self.records.write().await.push(Record::new(article));
        Ok(())
    }

    async fn replace_one(&self, title: &str, article: Article) -> Result<UpdateResult, StoreError> {
        Ok(replace_in(&mut *self.records.write().await, title, article))
    }

    async fn update_one(&self, title: &str, fields: ArticleFields) -> Result<Option<Article>, StoreError> {
        Ok(update_in(&mut *self.records.write().await, title, &fields))
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let count = records.len() as u64;
        records.clear();
        Ok(count)
    }

    async fn delete_one(&self, title: &str) -> Result<u64, StoreError> {
        Ok(delete_in(&mut *self.records.write().await, title))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
