//! In-process DocumentStore for tests and local runs without MongoDB.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StorefrontResult;
use crate::models::StoredDocument;
use crate::store::DocumentStore;

/// Keeps collections in memory, issuing ObjectId-shaped hex identifiers.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<StoredDocument>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self, collection: &str) -> StorefrontResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, mut fields: Map<String, Value>) -> StorefrontResult<String> {
        let id = ObjectId::new().to_hex();
        let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        fields.insert("created_at".to_string(), now.clone());
        fields.insert("updated_at".to_string(), now);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument::new(id.clone(), fields));

        Ok(id)
    }

    async fn count(&self, collection: &str) -> StorefrontResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn collection_names(&self) -> StorefrontResult<Vec<String>> {
        Ok(self.collections.read().await.keys().cloned().collect())
    }
}
