use axum_helpers::{cors_layer_from_env, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let (mongo_client, db) = match &config.mongodb {
        Some(mongodb) => {
            info!("Connecting to MongoDB at {}", mongodb.redacted_url());
            let client =
                database::mongodb::connect_from_config_with_retry(mongodb, None).await?;
            let db = client.database(mongodb.database());
            info!(
                "Successfully connected to MongoDB database: {}",
                mongodb.database()
            );
            (Some(client), Some(db))
        }
        None => {
            warn!("MONGODB_URL not set, running without a database");
            (None, None)
        }
    };

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let router = create_router::<openapi::ApiDoc>(
        api::root_routes(&state),
        api::api_routes(&state),
        cors_layer_from_env()?,
    );

    let mongo_client = state.mongo_client.clone();

    info!("Starting Mousepad Store API with graceful shutdown (30s timeout)");

    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = mongo_client {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connection closed successfully");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Mousepad Store API shutdown complete");
    Ok(())
}
