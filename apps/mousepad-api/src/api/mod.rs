//! API routes module

pub mod health;
pub mod storefront;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Routes nested under `/api` by `axum_helpers::create_router`.
pub fn api_routes(state: &AppState) -> Router {
    storefront::router(state)
}

/// Top-level routes: status banner, diagnostics, schemas, health and readiness.
pub fn root_routes(state: &AppState) -> Router {
    storefront::status_router(state)
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
