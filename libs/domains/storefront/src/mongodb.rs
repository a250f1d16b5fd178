//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use database::mongodb::{Collection, Database};
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, DateTime, Document, doc};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::StorefrontResult;
use crate::models::StoredDocument;
use crate::store::DocumentStore;

/// Stores every collection as untyped BSON documents in one database.
#[derive(Clone)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let store = MongoDocumentStore::new(client.database("mousepad_store"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Replace BSON datetimes with RFC 3339 strings, descending into documents and arrays.
fn dates_to_rfc3339(value: Bson) -> Bson {
    match value {
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Bson::String(s),
            Err(_) => Bson::DateTime(dt),
        },
        Bson::Document(document) => Bson::Document(
            document
                .into_iter()
                .map(|(key, value)| (key, dates_to_rfc3339(value)))
                .collect(),
        ),
        Bson::Array(values) => Bson::Array(values.into_iter().map(dates_to_rfc3339).collect()),
        other => other,
    }
}

/// Pull `_id` out as a string and render the rest as relaxed extended JSON,
/// with datetimes as RFC 3339 strings.
fn normalize(mut document: Document) -> StoredDocument {
    let id = document.remove("_id").map(id_to_string).unwrap_or_default();

    let fields = match dates_to_rfc3339(Bson::Document(document)).into_relaxed_extjson() {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    StoredDocument::new(id, fields)
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self))]
    async fn list(&self, collection: &str) -> StorefrontResult<Vec<StoredDocument>> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(normalize).collect())
    }

    #[instrument(skip(self, fields))]
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> StorefrontResult<String> {
        let mut document = bson::to_document(&fields)?;
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let result = self.collection(collection).insert_one(document).await?;
        let id = id_to_string(result.inserted_id);

        tracing::debug!(collection, id = %id, "Document inserted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn count(&self, collection: &str) -> StorefrontResult<u64> {
        Ok(self.collection(collection).count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn collection_names(&self) -> StorefrontResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_object_id_becomes_hex_string() {
        let oid = ObjectId::new();
        let doc = normalize(doc! { "_id": oid, "design": "Nebula Drift", "price": 39.99 });

        assert_eq!(doc.id, oid.to_hex());
        assert_eq!(doc.fields.get("design"), Some(&json!("Nebula Drift")));
        assert_eq!(doc.fields.get("price"), Some(&json!(39.99)));
        assert!(!doc.fields.contains_key("_id"));
    }

    #[test]
    fn test_string_ids_pass_through() {
        let doc = normalize(doc! { "_id": "custom-id", "stock_qty": 25_i64 });
        assert_eq!(doc.id, "custom-id");
        assert_eq!(doc.fields.get("stock_qty"), Some(&json!(25)));
    }

    #[test]
    fn test_timestamps_render_as_rfc3339_strings() {
        let created = DateTime::from_millis(1_760_000_000_000);
        let doc = normalize(doc! {
            "_id": ObjectId::new(),
            "design": "Nebula Drift",
            "created_at": created,
            "updated_at": created,
            "history": [{ "at": created }],
        });

        let expected = created.try_to_rfc3339_string().unwrap();
        assert_eq!(doc.fields.get("created_at"), Some(&json!(expected)));
        assert_eq!(doc.fields.get("updated_at"), Some(&json!(expected)));
        assert_eq!(doc.fields.get("history"), Some(&json!([{ "at": expected }])));
        assert!(
            chrono::DateTime::parse_from_rfc3339(doc.fields["created_at"].as_str().unwrap()).is_ok()
        );
    }

    #[test]
    fn test_nested_documents_are_kept() {
        let doc = normalize(doc! {
            "_id": ObjectId::new(),
            "items": [{ "mousepad_id": "a", "quantity": 2_i64, "unit_price": 10.0 }],
        });
        assert_eq!(
            doc.fields.get("items"),
            Some(&json!([{ "mousepad_id": "a", "quantity": 2, "unit_price": 10.0 }]))
        );
    }
}
