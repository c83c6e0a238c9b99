//! In-process document store. Used for local runs (`RECIPE_STORE=memory`) and tests.

use crate::domain::recipe::RecipeId;
use crate::storage::{Document, DocumentStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<(RecipeId, Document)>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a lost connection: every call fails with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<(RecipeId, Document)>, StoreError> {
        self.check_online()?;
        Ok(self.documents.read().await.clone())
    }

    async fn find(&self, id: RecipeId) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|(k, _)| *k == id).map(|(_, d)| d.clone()))
    }

    async fn insert(&self, document: Document) -> Result<RecipeId, StoreError> {
        self.check_online()?;
        let id = RecipeId::generate();
        self.documents.write().await.push((id, document));
        Ok(id)
    }

    async fn merge(&self, id: RecipeId, patch: Document) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let mut documents = self.documents.write().await;
        let Some((_, stored)) = documents.iter_mut().find(|(k, _)| *k == id) else {
            return Ok(None);
        };
        for (key, value) in patch {
            stored.insert(key, value);
        }
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|(k, _)| *k != id);
        Ok(documents.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn merge_overwrites_only_present_keys() {
        let store = MemoryStore::new();
        let id = store.insert(doc(json!({ "title": "A", "rating": 0 }))).await.unwrap();

        let merged = store.merge(id, doc(json!({ "rating": 3 }))).await.unwrap().unwrap();
        assert_eq!(merged, doc(json!({ "title": "A", "rating": 3 })));
        assert!(store.merge(RecipeId::generate(), Document::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn keeps_insertion_order_and_deletes() {
        let store = MemoryStore::new();
        let a = store.insert(doc(json!({ "n": 1 }))).await.unwrap();
        let b = store.insert(doc(json!({ "n": 2 }))).await.unwrap();
        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);

        assert!(store.delete(a).await.unwrap());
        assert!(!store.delete(a).await.unwrap());
        assert!(store.find(a).await.unwrap().is_none());
        assert!(store.find(b).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn offline_store_is_unavailable() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
