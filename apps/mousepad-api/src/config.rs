use core_config::{AppInfo, app_info, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE: &str = "mousepad_store";

/// Application-specific configuration
///
/// `mongodb` is `None` when no connection string is set; the API then
/// runs without a database.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: Option<MongoConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env_optional(DEFAULT_DATABASE)?
            .map(|config| match config.app_name {
                Some(_) => config,
                None => config.with_app_name(app.name),
            });
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;

        Ok(Self {
            app,
            mongodb,
            server,
            environment,
        })
    }
}
