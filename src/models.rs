// Core data structures for lookout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::error::LookupError;

/// Immutable lookup request for a named resource
///
/// Wraps the identifier used to build the request URL. Once created it is
/// never modified; cloning is cheap enough for handing copies to worker
/// tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupRequest(String);

impl LookupRequest {
    /// Create a request for the given identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// The raw identifier (e.g., a user or account name)
    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LookupRequest {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LookupRequest {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// User profile returned by the lookup service
///
/// Deserialized from a JSON object shaped like the GitHub `/users/{name}`
/// response. Only `login` is required; unknown fields in the payload are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Profile {
    /// Account login name (required)
    pub login: String,

    /// Display name
    pub name: Option<String>,

    /// Company or organization
    pub company: Option<String>,

    /// Blog or homepage URL
    pub blog: Option<String>,

    /// Free-form location
    pub location: Option<String>,

    /// Number of public repositories
    pub public_repos: Option<u64>,

    /// Follower count
    pub followers: Option<u64>,
}

impl Profile {
    /// One-line summary for result reporting
    pub fn summary(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({name})", self.login),
            None => self.login.clone(),
        }
    }
}

/// Resolved terminal state of a single lookup
///
/// Produced exactly once per dispatched lookup when its handle is resolved.
/// Either the profile or the failure is carried; there is no further
/// transition after this point.
#[derive(Debug)]
pub struct LookupOutcome {
    /// The request this outcome belongs to
    pub request: LookupRequest,

    /// Success or captured failure
    pub result: Result<Profile, LookupError>,

    /// How long the individual lookup took, dispatch to terminal state
    pub duration: Duration,
}

impl LookupOutcome {
    /// Whether the lookup resolved successfully
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Report for a completed fan-out batch
///
/// Outcomes appear in submission order, independent of completion order.
#[derive(Debug)]
pub struct BatchReport {
    /// Per-lookup outcomes in submission order
    pub outcomes: Vec<LookupOutcome>,

    /// Total wall-clock time from first dispatch to last resolution
    pub elapsed: Duration,

    /// When the batch started
    pub started_at: DateTime<Utc>,
}

impl BatchReport {
    /// Number of lookups dispatched in this batch
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of lookups that resolved successfully
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of lookups that resolved to a failure
    pub fn failure_count(&self) -> usize {
        self.total() - self.success_count()
    }
}
