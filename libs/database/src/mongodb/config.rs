#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};

/// Environment variables holding the connection string, in lookup order.
pub const URL_VARS: [&str; 3] = ["MONGODB_URL", "MONGO_URL", "DATABASE_URL"];

/// Environment variables holding the database name, in lookup order.
pub const DATABASE_VARS: [&str; 3] = ["MONGODB_DATABASE", "MONGO_DATABASE", "DATABASE_NAME"];

/// MongoDB connection settings
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mousepad_store")
///     .with_app_name("mousepad-api");
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Application name reported in server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Connection settings for `url` against the `default` database.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, "default")
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with any `user:password@` section masked, for logs.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                format!("{}://***@{}", &self.url[..scheme_end], &self.url[at + 1..])
            }
            _ => self.url.clone(),
        }
    }

    /// Load settings when a connection string is configured.
    ///
    /// Returns `Ok(None)` when none of [`URL_VARS`] is set, so callers can run
    /// without a database. The database name falls back to `default_database`.
    ///
    /// Optional tuning variables:
    /// - `MONGODB_APP_NAME`
    /// - `MONGODB_MAX_POOL_SIZE` (default: 100)
    /// - `MONGODB_MIN_POOL_SIZE` (default: 5)
    /// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
    /// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
    #[cfg(feature = "config")]
    pub fn from_env_optional(default_database: &str) -> Result<Option<Self>, ConfigError> {
        let Some(url) = env_first(&URL_VARS) else {
            return Ok(None);
        };
        let database = env_first(&DATABASE_VARS).unwrap_or_else(|| default_database.to_string());

        Self::tuned_from_env(url, database).map(Some)
    }

    #[cfg(feature = "config")]
    fn tuned_from_env(url: String, database: String) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Both a connection string and a database name are required here.
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first(&URL_VARS)
            .ok_or_else(|| ConfigError::MissingEnvVar(URL_VARS.join(" or ")))?;
        let database = env_first(&DATABASE_VARS)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_VARS.join(" or ")))?;

        Self::tuned_from_env(url, database)
    }
}
