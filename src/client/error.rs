//! Error types for lookup operations
//!
//! A lookup fails in one of two broad ways: the network call itself failed
//! (connect, DNS, timeout, non-2xx status) or the response body could not be
//! decoded into a profile. There is no retry; a single failure propagates
//! directly to the caller.

use thiserror::Error;

/// Errors that can occur during a single profile lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport-level failure (connection refused, DNS, TLS)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request exceeded the client timeout
    #[error("request timeout")]
    Timeout,

    /// Server responded with a non-success status
    #[error("server returned status {0}")]
    Status(u16),

    /// Response body did not match the expected profile schema
    #[error("decode error: {0}")]
    Decode(String),

    /// The identifier produced an invalid request URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The worker task resolving this lookup aborted or panicked
    #[error("lookup task failed: {0}")]
    Task(String),
}

impl LookupError {
    /// Whether this failure is transient (a later identical call may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
            Self::Decode(_) | Self::InvalidUrl(_) | Self::Task(_) => false,
        }
    }

    /// Whether this is a network-class failure as opposed to a decode failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout | Self::Status(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}
