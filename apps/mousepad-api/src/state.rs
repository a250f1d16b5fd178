//! Application state management.

use mongodb::{Client, Database};

/// Shared application state, cloned into each router that needs it.
///
/// The MongoDB handles are `None` when the API runs without a database.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Option<Client>,
    pub db: Option<Database>,
}
