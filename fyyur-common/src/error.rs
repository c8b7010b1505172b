//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Fyyur crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    ///
    /// Raised when the store rejects a read or write, e.g. a constraint
    /// violation. Any open transaction is rolled back when it is dropped.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or malformed submitted field
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Show submitted against an artist or venue that does not exist
    #[error("Unknown reference: {0}")]
    Referential(String),

    /// Stored show points at a record that no longer exists
    #[error("Data integrity error: {0}")]
    Integrity(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a `NotFound` error on a typed record
    pub fn not_found(kind: &str, id: i64) -> Self {
        Error::NotFound(format!("{} {} does not exist", kind, id))
    }

    /// True for faults caused by the submitted data rather than the store
    pub fn is_user_fault(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Referential(_))
    }
}
