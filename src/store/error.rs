use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for document store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection error - database unreachable or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error - connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// Database error - SQL errors
    #[error("Database error: {0}")]
    Database(String),

    /// Unique constraint violated (e.g. duplicate plugin name)
    #[error("Duplicate key: {0}")]
    Conflict(String),

    /// A stored row could not be decoded into a record
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Convert tokio-postgres errors to store errors
impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            if db_error.code() == &tokio_postgres::error::SqlState::UNIQUE_VIOLATION {
                let detail = db_error.detail().unwrap_or(db_error.message());
                return StoreError::Conflict(detail.to_string());
            }

            return StoreError::Database(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        StoreError::Database(format!("{:?}", err))
    }
}

/// Convert deadpool errors to store errors
impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

/// Convert deadpool build errors to store errors
impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

/// Convert JSON errors (metadata columns) to store errors
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(format!("JSON error: {}", err))
    }
}
