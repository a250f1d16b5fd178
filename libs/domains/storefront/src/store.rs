use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StorefrontResult;
use crate::models::StoredDocument;

/// Generic access to a schema-flexible document database.
///
/// Collections are addressed by name and created on first insert.
/// Implementations convert native identifiers to strings before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, in store order.
    async fn list(&self, collection: &str) -> StorefrontResult<Vec<StoredDocument>>;

    /// Insert one document and return its identifier as a string.
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> StorefrontResult<String>;

    async fn count(&self, collection: &str) -> StorefrontResult<u64>;

    /// Names of the collections that currently exist.
    async fn collection_names(&self) -> StorefrontResult<Vec<String>>;
}
