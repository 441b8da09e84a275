//! Unified error handling for the lookout crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors into a single `Error` enum, while keeping the
//! module-local error types usable on their own.
//!
//! # Architecture
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping domain-specific errors

use std::io;
use thiserror::Error;

// Re-export the domain-specific error for convenience
pub use crate::client::error::LookupError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (transport, timeout, non-2xx status)
    Network,
    /// Response decoding errors
    Decode,
    /// Configuration and validation errors
    Config,
    /// I/O errors
    Io,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the lookout crate
#[derive(Error, Debug)]
pub enum Error {
    /// Lookup errors (network, status, decode)
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Check if this error is recoverable (a retry by the caller may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Lookup(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Lookup(e) if e.is_network() => ErrorCategory::Network,
            Self::Lookup(_) | Self::Json(_) => ErrorCategory::Decode,
            Self::Io(_) => ErrorCategory::Io,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
