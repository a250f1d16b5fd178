//! Storefront Service - catalog, order and seeding rules

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{
    Collection, DiagnosticsReport, Mousepad, Order, SeedResponse, StoredDocument, to_fields,
};
use crate::seed::sample_mousepads;
use crate::store::DocumentStore;

/// Largest accepted gap between an order's declared total and its line sum.
pub const TOTAL_TOLERANCE: f64 = 0.01;

const BACKEND_RUNNING: &str = "✅ Running";
const DATABASE_CONNECTED: &str = "✅ Connected";
const DATABASE_NOT_CONNECTED: &str = "❌ Not Connected";
const ERROR_PREVIEW_CHARS: usize = 80;

/// Storefront operations over an optional document store.
///
/// Without a store every data operation fails with
/// [`StorefrontError::StoreUnavailable`], while diagnostics still answer.
pub struct StorefrontService<S: DocumentStore> {
    store: Option<Arc<S>>,
}

impl<S: DocumentStore> Clone for StorefrontService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> StorefrontService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Some(Arc::new(store)),
        }
    }

    /// A service with no backing store.
    pub fn without_store() -> Self {
        Self { store: None }
    }

    pub fn from_optional(store: Option<S>) -> Self {
        store.map_or_else(Self::without_store, Self::new)
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> StorefrontResult<&S> {
        self.store
            .as_deref()
            .ok_or(StorefrontError::StoreUnavailable)
    }

    #[instrument(skip(self))]
    pub async fn list_mousepads(&self) -> StorefrontResult<Vec<StoredDocument>> {
        self.store()?.list(Mousepad::NAME).await
    }

    #[instrument(skip(self, input), fields(design = %input.design))]
    pub async fn create_mousepad(&self, input: Mousepad) -> StorefrontResult<String> {
        input.validate()?;
        let store = self.store()?;

        let id = store.insert(Mousepad::NAME, to_fields(&input)?).await?;
        tracing::info!(mousepad_id = %id, "Mousepad created");
        Ok(id)
    }

    /// Check line quantities and the declared total, then persist the order.
    ///
    /// Nothing is written when a check fails. Referenced mousepads are neither
    /// looked up nor decremented.
    #[instrument(skip(self, input), fields(item_count = input.items.len()))]
    pub async fn create_order(&self, input: Order) -> StorefrontResult<String> {
        input.validate()?;
        check_order(&input)?;
        let store = self.store()?;

        let id = store.insert(Order::NAME, to_fields(&input)?).await?;
        tracing::info!(order_id = %id, total = input.total, "Order created");
        Ok(id)
    }

    /// Insert the sample catalog unless at least one mousepad exists.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> StorefrontResult<SeedResponse> {
        let store = self.store()?;

        if store.count(Mousepad::NAME).await? > 0 {
            tracing::debug!("Catalog already seeded");
            return Ok(SeedResponse::already_seeded());
        }

        let samples = sample_mousepads();
        for pad in &samples {
            store.insert(Mousepad::NAME, to_fields(pad)?).await?;
        }

        tracing::info!(count = samples.len(), "Catalog seeded");
        Ok(SeedResponse::seeded(samples.len()))
    }

    /// Report backend and store connectivity. Never fails.
    #[instrument(skip(self))]
    pub async fn diagnostics(&self) -> DiagnosticsReport {
        let (database, collections) = match &self.store {
            None => (DATABASE_NOT_CONNECTED.to_string(), None),
            Some(store) => match store.collection_names().await {
                Ok(names) => (DATABASE_CONNECTED.to_string(), Some(names)),
                Err(e) => {
                    tracing::warn!(error = %e, "Listing collections failed");
                    (format!("❌ Error: {}", preview(&e.to_string())), None)
                }
            },
        };

        DiagnosticsReport {
            backend: BACKEND_RUNNING.to_string(),
            database,
            collections,
        }
    }
}

/// Quantities must be at least one and the line sum must match `total`
/// within [`TOTAL_TOLERANCE`].
pub fn check_order(order: &Order) -> StorefrontResult<()> {
    if let Some(item) = order.items.iter().find(|item| item.quantity <= 0) {
        return Err(StorefrontError::InvalidQuantity {
            mousepad_id: item.mousepad_id.clone(),
            quantity: item.quantity,
        });
    }

    let computed = order.computed_total();
    if (computed - order.total).abs() > TOTAL_TOLERANCE {
        return Err(StorefrontError::TotalMismatch {
            declared: order.total,
            computed,
        });
    }

    Ok(())
}

fn preview(message: &str) -> String {
    message.chars().take(ERROR_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use crate::store::MockDocumentStore;

    fn order(items: Vec<(i64, f64)>, total: f64) -> Order {
        Order {
            customer_name: "Ada Lovelace".into(),
            customer_email: "ada@example.com".into(),
            shipping_address: "12 Analytical Way".into(),
            items: items
                .into_iter()
                .enumerate()
                .map(|(i, (quantity, unit_price))| OrderItem {
                    mousepad_id: format!("pad-{i}"),
                    quantity,
                    unit_price,
                })
                .collect(),
            total,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_order_within_tolerance() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .withf(|collection, fields| collection == "order" && fields["total"] == 20.0)
            .times(1)
            .returning(|_, _| Ok("order-1".to_string()));

        let service = StorefrontService::new(store);
        let id = service.create_order(order(vec![(2, 10.0)], 20.0)).await.unwrap();
        assert_eq!(id, "order-1");
    }

    #[tokio::test]
    async fn test_create_order_accepts_rounding_slack() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_, _| Ok("order-2".to_string()));

        let service = StorefrontService::new(store);
        let result = service
            .create_order(order(vec![(2, 10.0)], 20.005))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_order_total_mismatch_writes_nothing() {
        let mut store = MockDocumentStore::new();
        store.expect_insert().never();

        let service = StorefrontService::new(store);
        let err = service
            .create_order(order(vec![(2, 10.0)], 21.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::TotalMismatch { .. }));
        assert_eq!(err.to_string(), "Total does not match sum of items");
    }

    #[tokio::test]
    async fn test_create_order_just_past_tolerance_writes_nothing() {
        let mut store = MockDocumentStore::new();
        store.expect_insert().never();

        let service = StorefrontService::new(store);
        let err = service
            .create_order(order(vec![(2, 10.0)], 20.02))
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::TotalMismatch { .. }));
    }

    #[test]
    fn test_check_order_rejects_zero_quantity_before_total() {
        let err = check_order(&order(vec![(1, 5.0), (0, 10.0)], 999.0)).unwrap_err();
        match err {
            StorefrontError::InvalidQuantity {
                mousepad_id,
                quantity,
            } => {
                assert_eq!(mousepad_id, "pad-1");
                assert_eq!(quantity, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_order_with_zero_quantity_is_rejected() {
        let mut store = MockDocumentStore::new();
        store.expect_insert().never();

        let service = StorefrontService::new(store);
        let err = service
            .create_order(order(vec![(0, 10.0)], 0.0))
            .await
            .unwrap_err();
        // Field validation runs first and carries the same message
        let StorefrontError::Validation(errors) = err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(
            serde_json::to_string(&errors)
                .unwrap()
                .contains("Quantity must be >= 1")
        );
    }

    #[tokio::test]
    async fn test_create_mousepad_propagates_store_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_insert()
            .withf(|collection, _| collection == "mousepad")
            .returning(|_, _| Err(StorefrontError::Database("write concern failed".into())));

        let service = StorefrontService::new(store);
        let err = service
            .create_mousepad(Mousepad::new("Nebula Drift", 39.99, "Swirls"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "write concern failed");
    }

    #[tokio::test]
    async fn test_seed_empty_store_inserts_three_samples() {
        let mut store = MockDocumentStore::new();
        store
            .expect_count()
            .withf(|collection| collection == "mousepad")
            .returning(|_| Ok(0));
        store
            .expect_insert()
            .withf(|collection, fields| collection == "mousepad" && fields["price"] == 39.99)
            .times(3)
            .returning(|_, _| Ok("id".to_string()));

        let service = StorefrontService::new(store);
        assert_eq!(service.seed().await.unwrap(), SeedResponse::seeded(3));
    }

    #[tokio::test]
    async fn test_seed_non_empty_store_is_noop() {
        let mut store = MockDocumentStore::new();
        store.expect_count().returning(|_| Ok(3));
        store.expect_insert().never();

        let service = StorefrontService::new(store);
        assert_eq!(service.seed().await.unwrap(), SeedResponse::already_seeded());
    }

    #[tokio::test]
    async fn test_list_without_store_is_unavailable() {
        let service = StorefrontService::<MockDocumentStore>::without_store();
        assert!(!service.has_store());
        assert!(matches!(
            service.list_mousepads().await,
            Err(StorefrontError::StoreUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_diagnostics_connected_lists_collections() {
        let mut store = MockDocumentStore::new();
        store
            .expect_collection_names()
            .returning(|| Ok(vec!["mousepad".into(), "order".into()]));

        let report = StorefrontService::new(store).diagnostics().await;
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "✅ Connected");
        assert_eq!(
            report.collections,
            Some(vec!["mousepad".to_string(), "order".to_string()])
        );
    }

    #[tokio::test]
    async fn test_diagnostics_truncates_error_message() {
        let long_message = "x".repeat(200);
        let mut store = MockDocumentStore::new();
        let message = long_message.clone();
        store
            .expect_collection_names()
            .returning(move || Err(StorefrontError::Database(message.clone())));

        let report = StorefrontService::new(store).diagnostics().await;
        assert_eq!(report.database, format!("❌ Error: {}", &long_message[..80]));
        assert!(report.collections.is_none());
    }

    #[tokio::test]
    async fn test_diagnostics_without_store() {
        let report = StorefrontService::<MockDocumentStore>::from_optional(None)
            .diagnostics()
            .await;
        assert_eq!(report.database, "❌ Not Connected");
        assert!(report.collections.is_none());
    }
}
