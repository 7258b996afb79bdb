//! Error types and Result aliases for relicdex.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use thiserror::Error;

/// Result type alias using relicdex's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for relicdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Catalog lookup error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Server/API error.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors surfaced by catalog fetches.
///
/// Read and parse failures collapse into `NotFound`; callers never learn
/// whether a file was missing or corrupt.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Request did not name a usable path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// File is missing, unreadable, or not valid JSON.
    #[error("not found: '{path}'")]
    NotFound { path: String },
}

/// Server/API errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind to {address}: {reason}")]
    BindFailed { address: String, reason: String },

    /// Request handling error.
    #[error("request error: {0}")]
    Request(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl CatalogError {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid-path error.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }
}
