/// Unified error type for connection-level database operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver error reported by MongoDB
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
