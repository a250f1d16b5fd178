//! Readiness endpoint

use axum::{Router, extract::State, routing::get};
use axum_helpers::{HealthCheckFuture, ReadinessResult, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies the MongoDB connection
///
/// Without a configured database the service reports itself not ready.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable or not configured")
    )
)]
pub(crate) async fn readiness_check(State(state): State<AppState>) -> ReadinessResult {
    let database: HealthCheckFuture<'_> = match &state.db {
        Some(db) => Box::pin(async move {
            let status = check_health_detailed(db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
            if status.healthy {
                Ok(())
            } else {
                Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
            }
        }),
        None => Box::pin(async { Err("no connection string configured".to_string()) }),
    };

    run_health_checks(vec![("database", database)]).await
}
