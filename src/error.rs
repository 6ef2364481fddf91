//! Error types for the bakery store
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BakeryError
pub type Result<T> = std::result::Result<T, BakeryError>;

/// Unified error type for bakery store operations
#[derive(Debug, Error)]
pub enum BakeryError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors (produced inside a worker, returned through the reply)
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(String),

    #[error("inventory item not found")]
    NotFound,

    // -------------------------------------------------------------------------
    // Call Errors (produced by the calling wrapper, never by a worker)
    // -------------------------------------------------------------------------
    #[error("{0} queue is busy")]
    Busy(&'static str),

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error("request cancelled by caller")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("{0} is closed")]
    Closed(&'static str),

    // -------------------------------------------------------------------------
    // Statement Errors
    // -------------------------------------------------------------------------
    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("transactions are not supported by the memory driver")]
    TransactionsUnsupported,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BakeryError {
    /// Build a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        BakeryError::Validation(message.into())
    }

    /// True for business-rule rejections the caller can fix by changing input
    pub fn is_validation(&self) -> bool {
        matches!(self, BakeryError::Validation(_))
    }

    /// True when an update/delete referenced a missing id
    pub fn is_not_found(&self) -> bool {
        matches!(self, BakeryError::NotFound)
    }

    /// True for Busy/Timeout: the worker did not answer in time and a retry may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, BakeryError::Busy(_) | BakeryError::Timeout(_))
    }
}
