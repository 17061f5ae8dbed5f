//! Core error types for the goal store.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the goal store.
///
/// Every variant renders to a message that can be shown to the user as-is,
/// which is what the failure notification carries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn goal_not_found() -> Self {
        Error::NotFound("Goal not found".to_string())
    }

    pub fn zero_progress_amount() -> Self {
        Error::InvalidAmount("Progress amount cannot be zero".to_string())
    }

    pub fn progress_amount_too_large() -> Self {
        Error::InvalidAmount("Progress amount is too large".to_string())
    }
}

/// Validation failures for goal drafts.
///
/// Variants are listed in the order the rules are checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Goal title is required")]
    MissingTitle,

    #[error("Goal description is required")]
    MissingDescription,

    #[error("Target amount must be greater than zero")]
    NonPositiveTargetAmount,

    #[error("Current amount cannot be negative")]
    NegativeCurrentAmount,

    #[error("Target date is required")]
    MissingTargetDate,

    #[error("Target date must be in the future")]
    TargetDateNotInFuture,

    #[error("A goal with this title already exists")]
    DuplicateTitle,
}

/// Storage-agnostic error type for persistence operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Database(DatabaseError::Serialization(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::Internal(err.to_string()))
    }
}
