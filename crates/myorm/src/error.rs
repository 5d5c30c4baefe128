//! Error types for myorm

use thiserror::Error;

/// Result type alias for myorm operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations
///
/// Statement building never fails: builders are total over well-formed
/// inputs, and malformed statements surface as [`DbError::Query`] when the
/// server rejects them.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to obtain a connection from a pool
    #[error("connection error: {0}")]
    Connection(String),

    /// Driver-reported query error
    #[error("query error: {0}")]
    Query(#[from] mysql_async::Error),

    /// The requested named pool does not exist
    #[error("pool `{0}` is not configured")]
    UnknownPool(String),

    /// Invalid pool or client configuration
    #[error("invalid config: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DbError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a connection-acquisition error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a driver-reported query error
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
