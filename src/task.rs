//! Asynchronous lookup tasks and handles
//!
//! Wraps a [`LookupClient`] call in a worker task and hands back an explicit
//! [`PendingLookup`] handle. The spawn call returns immediately; the lookup
//! runs on the tokio worker pool, never on the caller's task. Failures
//! inside the task are captured into the handle and surfaced only when the
//! handle is resolved.
//!
//! An optional fixed delay can be applied after the network call completes,
//! to simulate a slow service for demonstrations and timing tests.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::client::error::LookupError;
use crate::client::LookupClient;
use crate::models::{LookupOutcome, LookupRequest, Profile};

/// Handle for an in-flight lookup
///
/// Owned exclusively by whoever dispatched it; resolving consumes the
/// handle, so each lookup is observed exactly once. Dropping an unresolved
/// handle does not cancel the underlying task.
pub struct PendingLookup {
    request: LookupRequest,
    handle: JoinHandle<Result<Profile, LookupError>>,
    dispatched_at: Instant,
}

impl PendingLookup {
    /// The request this handle tracks
    pub fn request(&self) -> &LookupRequest {
        &self.request
    }

    /// Whether the underlying task has reached a terminal state
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the lookup reaches a terminal state and return it
    ///
    /// Never panics on a worker failure: an aborted or panicked task
    /// resolves to `LookupError::Task`.
    pub async fn resolve(self) -> LookupOutcome {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(join_err) => Err(LookupError::Task(join_err.to_string())),
        };

        LookupOutcome {
            request: self.request,
            result,
            duration: self.dispatched_at.elapsed(),
        }
    }
}

/// Spawns lookups onto worker tasks
///
/// The client is shared read-only across all spawned tasks so HTTP
/// connections are reused.
#[derive(Clone)]
pub struct LookupSpawner {
    client: Arc<LookupClient>,

    /// Fixed delay applied after the network call, before resolution
    simulated_delay: Option<Duration>,
}

impl LookupSpawner {
    /// Create a spawner over the given client, with no artificial delay
    pub fn new(client: Arc<LookupClient>) -> Self {
        Self {
            client,
            simulated_delay: None,
        }
    }

    /// Apply a fixed artificial delay to every lookup
    ///
    /// The delay runs after the network call completes and before the handle
    /// resolves. A zero duration disables it.
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Dispatch one lookup and return its handle immediately
    ///
    /// The returned handle resolves to a failure state if the lookup fails;
    /// nothing is raised at the spawn site.
    pub fn spawn_lookup(&self, request: LookupRequest) -> PendingLookup {
        let client = Arc::clone(&self.client);
        let delay = self.simulated_delay;
        let task_request = request.clone();
        let dispatched_at = Instant::now();

        let handle = tokio::spawn(async move {
            tracing::debug!(identifier = %task_request, "Lookup task started");

            let result = client.lookup(&task_request).await;

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            result
        });

        PendingLookup {
            request,
            handle,
            dispatched_at,
        }
    }

    /// The configured artificial delay, if any
    pub fn simulated_delay(&self) -> Option<Duration> {
        self.simulated_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_spawner() -> LookupSpawner {
        // Port 9 (discard) is unreachable; tasks fail fast with a network error
        let client = LookupClient::with_base_url("http://127.0.0.1:9", 100).unwrap();
        LookupSpawner::new(Arc::new(client))
    }

    #[test]
    fn test_zero_delay_disables_simulation() {
        let spawner = test_spawner().with_simulated_delay(Duration::ZERO);
        assert!(spawner.simulated_delay().is_none());

        let spawner = test_spawner().with_simulated_delay(Duration::from_millis(5));
        assert_eq!(spawner.simulated_delay(), Some(Duration::from_millis(5)));
    }

    #[tokio::test]
    async fn test_failure_resolves_into_handle() {
        let spawner = test_spawner();
        let pending = spawner.spawn_lookup("nobody".into());

        let outcome = pending.resolve().await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.request.identifier(), "nobody");
        assert!(outcome.result.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn test_spawn_returns_before_resolution() {
        let spawner = test_spawner().with_simulated_delay(Duration::from_millis(200));
        let started = Instant::now();
        let pending = spawner.spawn_lookup("nobody".into());

        // Dispatch must not block on the lookup itself
        assert!(started.elapsed() < Duration::from_millis(100));

        let _ = pending.resolve().await;
    }
}
