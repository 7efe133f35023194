//! Error types for the Search Console client
//!
//! This module defines all error types used throughout the library.
//! Transport failures are kept in their own enum so that any
//! `SearchConsoleService` implementation can report them without
//! depending on the HTTP stack.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by the service collaborator.
///
/// Surfaced unchanged through [`GscError::Transport`]; the core never
/// retries on its own.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network, TLS, timeout or body decoding failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Error type for Search Console operations
#[derive(Error, Debug)]
pub enum GscError {
    /// A builder method received a value outside its enum/type contract
    #[error("Invalid argument: {0}")]
    InvalidArgumentType(String),

    /// A date string is not an ISO-8601 calendar date
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// Positional access beyond the end of a list
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// No web property backs the requested builder
    #[error("Missing web property: {0}")]
    MissingWebProperty(String),

    /// The service collaborator failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Reading or writing a persisted report failed
    #[error("Storage error on {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report could not be encoded
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    /// A persisted blob is corrupt or was not produced by this library
    #[error("Failed to deserialize report: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),
}

impl From<reqwest::Error> for GscError {
    fn from(err: reqwest::Error) -> Self {
        GscError::Transport(TransportError::Http(err))
    }
}

/// Result type alias for Search Console operations
pub type Result<T> = std::result::Result<T, GscError>;
