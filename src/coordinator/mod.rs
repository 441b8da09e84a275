//! Fan-out coordinator with a join barrier
//!
//! Dispatches one asynchronous lookup per identifier, blocks at a single
//! join barrier until every handle in the batch has reached a terminal
//! state, then reports each outcome in submission order together with the
//! total wall-clock elapsed time.
//!
//! ```text
//!  identifiers ──▶ spawn ──▶ PendingLookup ─┐
//!  identifiers ──▶ spawn ──▶ PendingLookup ─┼──▶ join barrier ──▶ ordered outcomes
//!  identifiers ──▶ spawn ──▶ PendingLookup ─┘
//! ```
//!
//! Failure in one lookup never cancels its siblings; each runs to
//! completion and its failure is surfaced at its own position in the
//! report. There is no per-lookup timeout beyond what the HTTP client
//! enforces, and no external abort path once a batch is dispatched.

use chrono::Utc;
use std::time::Instant;

use crate::models::{BatchReport, LookupRequest};
use crate::task::LookupSpawner;

/// Coordinates concurrent lookup batches
pub struct FanOutCoordinator {
    spawner: LookupSpawner,
}

impl FanOutCoordinator {
    /// Create a coordinator over the given spawner
    pub fn new(spawner: LookupSpawner) -> Self {
        Self { spawner }
    }

    /// Run a batch of lookups concurrently and report in submission order
    ///
    /// Dispatches exactly one lookup per identifier, then suspends at the
    /// join barrier until all of them have resolved. Every handle created
    /// here is observed exactly once before this method returns. An empty
    /// batch returns immediately with an empty report.
    pub async fn run_batch<I, R>(&self, identifiers: I) -> BatchReport
    where
        I: IntoIterator<Item = R>,
        R: Into<LookupRequest>,
    {
        let started_at = Utc::now();
        let start = Instant::now();

        // Fan-out: dispatch everything before waiting on anything
        let pending: Vec<_> = identifiers
            .into_iter()
            .map(|id| self.spawner.spawn_lookup(id.into()))
            .collect();

        tracing::info!(count = pending.len(), "Dispatched lookup batch");

        // Join barrier: wait for every handle to reach a terminal state.
        // join_all preserves input order, so outcomes line up with
        // submission order no matter which lookup finishes first.
        let outcomes =
            futures::future::join_all(pending.into_iter().map(|p| p.resolve())).await;

        let elapsed = start.elapsed();

        for outcome in &outcomes {
            match &outcome.result {
                Ok(profile) => {
                    tracing::info!(
                        identifier = %outcome.request,
                        duration_ms = outcome.duration.as_millis() as u64,
                        "--> {}",
                        profile.summary()
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        identifier = %outcome.request,
                        duration_ms = outcome.duration.as_millis() as u64,
                        error = %err,
                        "Lookup failed"
                    );
                }
            }
        }

        tracing::info!(
            elapsed_ms = elapsed.as_millis() as u64,
            total = outcomes.len(),
            "Batch complete"
        );

        BatchReport {
            outcomes,
            elapsed,
            started_at,
        }
    }

    /// The spawner used for dispatch
    pub fn spawner(&self) -> &LookupSpawner {
        &self.spawner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LookupClient;
    use std::sync::Arc;
    use std::time::Duration;

    fn unreachable_coordinator() -> FanOutCoordinator {
        let client = LookupClient::with_base_url("http://127.0.0.1:9", 100).unwrap();
        FanOutCoordinator::new(LookupSpawner::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn test_empty_batch_returns_immediately() {
        let coordinator = unreachable_coordinator();
        let report = coordinator.run_batch(Vec::<String>::new()).await;

        assert_eq!(report.total(), 0);
        assert!(report.elapsed < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_batch_dispatches_one_lookup_per_identifier() {
        let coordinator = unreachable_coordinator();
        let report = coordinator.run_batch(["a", "b", "c"]).await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.failure_count(), 3);
    }

    #[tokio::test]
    async fn test_outcomes_in_submission_order() {
        let coordinator = unreachable_coordinator();
        let report = coordinator.run_batch(["x", "y", "z"]).await;

        let order: Vec<_> = report
            .outcomes
            .iter()
            .map(|o| o.request.identifier().to_string())
            .collect();
        assert_eq!(order, ["x", "y", "z"]);
    }
}
