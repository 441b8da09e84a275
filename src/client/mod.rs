//! HTTP lookup client with rate limiting
//!
//! This module provides the blocking-call half of the fan-out flow: a single
//! outbound GET per identifier against a JSON user-lookup service, decoded
//! into a typed [`Profile`](crate::models::Profile). Features:
//! - shared `reqwest::Client` for connection reuse across worker tasks
//! - rate limiting with governor
//! - base URL override for testing against mock servers
//!
//! Deliberately absent: retries. A failed lookup propagates its error to the
//! caller unchanged; batch-level handling decides what to do with it.

pub mod error;

use crate::models::{LookupRequest, Profile};
use error::LookupError;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, StatusCode,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Default public endpoint for user lookups
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Profile lookup client
///
/// Holds the HTTP client and rate limiter; shared read-only across worker
/// tasks so connections are reused. No mutable state is written by
/// concurrent lookups.
pub struct LookupClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    /// Base URL for the lookup service
    base_url: String,
}

impl LookupClient {
    /// Create a new client against the default endpoint
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Maximum number of requests per second
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` if the HTTP client cannot be created
    pub fn new(requests_per_second: u32) -> Result<Self, LookupError> {
        Self::with_config(
            DEFAULT_BASE_URL,
            requests_per_second,
            Duration::from_secs(30),
            concat!("lookout/", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the lookup service (no trailing slash)
    /// * `requests_per_second` - Maximum number of requests per second
    /// * `timeout` - Request timeout duration
    /// * `user_agent` - User-Agent header value
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` if the HTTP client cannot be created
    pub fn with_config(
        base_url: &str,
        requests_per_second: u32,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(Self::build_headers(user_agent))
            .build()
            .map_err(LookupError::Network)?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        let quota = Quota::per_second(rate);
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client against a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, requests_per_second: u32) -> Result<Self, LookupError> {
        Self::with_config(
            base_url,
            requests_per_second,
            Duration::from_secs(30),
            concat!("lookout/", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Look up a single profile
    ///
    /// Issues one GET to `{base_url}/users/{identifier}` and decodes the
    /// JSON response. Blocks (awaits) until the call completes; run it on a
    /// worker task via [`crate::task::LookupSpawner`] for asynchronous use.
    ///
    /// # Errors
    ///
    /// - `LookupError::Network` / `LookupError::Timeout` for transport
    ///   failures
    /// - `LookupError::Status` for non-2xx responses
    /// - `LookupError::Decode` if the body is not a valid profile document
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Profile, LookupError> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let url = self.lookup_url(request)?;
        tracing::debug!(identifier = %request, url = %url, "Looking up profile");

        let response = self.client.get(url).send().await.map_err(LookupError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        Self::decode_profile(status, &response.bytes().await.map_err(LookupError::from)?)
    }

    /// Build the request URL for an identifier
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidUrl` if the identifier does not form a
    /// valid URL path segment
    fn lookup_url(&self, request: &LookupRequest) -> Result<url::Url, LookupError> {
        let raw = format!("{}/users/{}", self.base_url, request.identifier());
        url::Url::parse(&raw).map_err(|e| LookupError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Decode a response body into a profile
    fn decode_profile(status: StatusCode, bytes: &[u8]) -> Result<Profile, LookupError> {
        serde_json::from_slice(bytes).map_err(|e| {
            LookupError::Decode(format!("unexpected body for status {status}: {e}"))
        })
    }

    /// Build default HTTP headers for lookup requests
    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("lookout")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        headers
    }

    /// Base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LookupClient::new(10);
        assert!(client.is_ok());

        let client = LookupClient::with_config(
            "http://localhost:8080",
            5,
            Duration::from_secs(10),
            "lookout-test",
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LookupClient::with_base_url("http://localhost:8080/", 10).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_lookup_url() {
        let client = LookupClient::with_base_url("http://localhost:8080", 10).unwrap();
        let url = client.lookup_url(&LookupRequest::new("octocat")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users/octocat");
    }

    #[test]
    fn test_decode_profile_valid() {
        let body = br#"{"login": "octocat", "name": "The Octocat"}"#;
        let profile = LookupClient::decode_profile(StatusCode::OK, body).unwrap();
        assert_eq!(profile.login, "octocat");
    }

    #[test]
    fn test_decode_profile_malformed() {
        let body = b"<html>not json</html>";
        let result = LookupClient::decode_profile(StatusCode::OK, body);
        assert!(matches!(result, Err(LookupError::Decode(_))));
    }

    #[test]
    fn test_default_headers() {
        let headers = LookupClient::build_headers("lookout-test");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "lookout-test");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }
}
