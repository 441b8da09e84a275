//! Explicit component composition
//!
//! There is no runtime wiring or scanning in this crate: the [`Registry`] is
//! the single startup routine that validates configuration and constructs
//! the client, cache, spawner, and coordinator by direct reference. Anything
//! that needs a component gets it from here.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cache::{ProfileCache, ProfileCacheConfig};
use crate::client::error::LookupError;
use crate::client::LookupClient;
use crate::config::Config;
use crate::coordinator::FanOutCoordinator;
use crate::models::{BatchReport, LookupRequest, Profile};
use crate::task::LookupSpawner;

/// Process-wide component registry
pub struct Registry {
    config: Config,
    client: Arc<LookupClient>,
    cache: Arc<ProfileCache>,
    coordinator: FanOutCoordinator,
}

impl Registry {
    /// Build all components from a validated configuration
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let client = Arc::new(
            LookupClient::with_config(
                &config.lookup.base_url,
                config.lookup.rate_limit,
                config.request_timeout(),
                &config.lookup.user_agent,
            )
            .context("Failed to create lookup client")?,
        );

        let cache = Arc::new(ProfileCache::new(ProfileCacheConfig {
            capacity: config.cache.capacity,
            ttl: config.cache_ttl(),
            key_prefix: config.cache.key_prefix.clone(),
        }));

        let spawner =
            LookupSpawner::new(Arc::clone(&client)).with_simulated_delay(config.simulated_delay());
        let coordinator = FanOutCoordinator::new(spawner);

        tracing::debug!(
            base_url = %config.lookup.base_url,
            rate_limit = config.lookup.rate_limit,
            cache_enabled = config.cache.enabled,
            "Registry assembled"
        );

        Ok(Self {
            config,
            client,
            cache,
            coordinator,
        })
    }

    /// Run a fan-out batch over the given identifiers
    pub async fn run_batch<I, R>(&self, identifiers: I) -> BatchReport
    where
        I: IntoIterator<Item = R>,
        R: Into<LookupRequest>,
    {
        self.coordinator.run_batch(identifiers).await
    }

    /// Look up a single profile through the cache
    ///
    /// With the cache disabled in configuration this is a plain client call.
    pub async fn cached_lookup(&self, identifier: &str) -> Result<Profile, LookupError> {
        let request = LookupRequest::new(identifier);

        if !self.config.cache.enabled {
            return self.client.lookup(&request).await;
        }

        self.cache
            .get_or_compute(identifier, || async { self.client.lookup(&request).await })
            .await
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared lookup client
    pub fn client(&self) -> &Arc<LookupClient> {
        &self.client
    }

    /// The profile cache
    pub fn cache(&self) -> &Arc<ProfileCache> {
        &self.cache
    }

    /// The fan-out coordinator
    pub fn coordinator(&self) -> &FanOutCoordinator {
        &self.coordinator
    }
}
