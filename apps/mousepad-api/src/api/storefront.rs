//! Storefront API routes
//!
//! Wires the storefront domain to the configured MongoDB database, if any.

use axum::Router;
use domain_storefront::{MongoDocumentStore, StorefrontService, handlers};

use crate::state::AppState;

fn service(state: &AppState) -> StorefrontService<MongoDocumentStore> {
    StorefrontService::from_optional(state.db.clone().map(MongoDocumentStore::new))
}

/// `/mousepads`, `/orders` and `/seed`
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

/// `/`, `/test` and `/schema`
pub fn status_router(state: &AppState) -> Router {
    handlers::status_router(service(state))
}
