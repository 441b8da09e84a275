//! lookout - Concurrent fan-out user profile lookups
//!
//! A small tool that looks up user profiles against a JSON HTTP API, fanning
//! out a batch of lookups onto worker tasks, joining on all of them, and
//! reporting each result in submission order with total elapsed time.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`client`] - HTTP lookup client with rate limiting
//! - [`task`] - Worker-task dispatch and pending-lookup handles
//! - [`coordinator`] - Fan-out batches with a join barrier
//! - [`cache`] - Explicit get-or-compute profile cache
//! - [`registry`] - Startup composition of all components
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use lookout::config::Config;
//! use lookout::registry::Registry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let registry = Registry::from_config(config)?;
//!
//!     let report = registry.run_batch(["octocat", "torvalds"]).await;
//!     println!("{} lookups in {:?}", report.total(), report.elapsed);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod registry;
pub mod task;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{ProfileCache, ProfileCacheConfig};
    pub use crate::client::{error::LookupError, LookupClient};
    pub use crate::config::Config;
    pub use crate::coordinator::FanOutCoordinator;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{BatchReport, LookupOutcome, LookupRequest, Profile};
    pub use crate::registry::Registry;
    pub use crate::task::{LookupSpawner, PendingLookup};
}

// Direct re-exports for convenience
pub use models::{BatchReport, LookupOutcome, LookupRequest, Profile};
