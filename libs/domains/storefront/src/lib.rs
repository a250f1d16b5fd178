//! Storefront Domain
//!
//! Mousepad catalog and order intake over a generic document store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← HTTP endpoints (`/`, `/test`, `/schema`, `/api/...`)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Service    │  ← Quantity and total checks, seeding, diagnostics
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │DocumentStore │  ← Trait + MongoDB and in-memory implementations
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← Validated records, response bodies
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_storefront::{MongoDocumentStore, StorefrontService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let service = StorefrontService::new(MongoDocumentStore::new(client.database("mousepad_store")));
//!
//! let api = handlers::router(service.clone());
//! let status = handlers::status_router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod seed;
pub mod service;
pub mod store;

pub use error::{StorefrontError, StorefrontResult};
pub use handlers::{ApiDoc, StatusApiDoc};
pub use memory::InMemoryDocumentStore;
pub use models::{
    Collection, CreatedResponse, DiagnosticsReport, Mousepad, MousepadList, Order, OrderItem,
    Product, SeedResponse, SeedStatus, StoredDocument, User,
};
pub use self::mongodb::MongoDocumentStore;
pub use service::{StorefrontService, TOTAL_TOLERANCE};
pub use store::DocumentStore;
