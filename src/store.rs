//! Key/value document storage used for authored recipes, comments and
//! profiles. The remote backend lives in the app; this crate only needs the
//! trait and an in-memory implementation.

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Document at `key` in `collection`, if any
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write `document` at `key`, replacing whatever was there
    async fn set(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError>;

    /// Remove the document at `key`. Removing a missing key is not an error
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// Every document in `collection` with its key
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError>;
}

/// Document store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn set(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::Invalid("document key cannot be empty".to_string()));
        }
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, doc)| (key.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
