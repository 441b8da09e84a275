//! In-process memoizing cache for looked-up profiles
//!
//! An explicit cache with a defined key derivation (SHA-256 over the
//! normalized identifier, namespaced by a prefix), a single get-or-compute
//! entry point, and a visible eviction policy: entries expire after a TTL
//! checked on read, and inserts beyond capacity evict the oldest entry.
//!
//! # Example
//!
//! ```rust,ignore
//! use lookout::cache::{ProfileCache, ProfileCacheConfig};
//!
//! let cache = ProfileCache::new(ProfileCacheConfig::default());
//! let profile = cache
//!     .get_or_compute("octocat", || async { client.lookup(&"octocat".into()).await })
//!     .await?;
//! ```

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::client::error::LookupError;
use crate::models::Profile;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct ProfileCacheConfig {
    /// Maximum number of cached profiles
    pub capacity: usize,

    /// Time-to-live per entry
    pub ttl: Duration,

    /// Key prefix for namespacing
    pub key_prefix: String,
}

impl Default for ProfileCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            ttl: Duration::from_secs(3600), // 1 hour
            key_prefix: "lookout".to_string(),
        }
    }
}

/// A cached profile with its insertion metadata
#[derive(Debug, Clone)]
struct CachedProfile {
    profile: Profile,
    inserted: Instant,
    cached_at: DateTime<Utc>,
}

/// Cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Total cache hits
    pub hits: u64,
    /// Total cache misses
    pub misses: u64,
    /// Entries evicted by TTL or capacity
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// In-memory profile cache
pub struct ProfileCache {
    entries: Mutex<HashMap<String, CachedProfile>>,
    config: ProfileCacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ProfileCache {
    /// Create a new cache
    pub fn new(config: ProfileCacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Key Generation
    // =========================================================================

    /// Derive the cache key for an identifier
    ///
    /// Keys are `{prefix}:profile:{sha256(lowercase identifier)}`. Lookup
    /// identifiers are case-insensitive at the remote service, so the key is
    /// derived from the lowercased form.
    pub fn derive_key(&self, identifier: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(identifier.to_lowercase().as_bytes());
        format!(
            "{}:profile:{:x}",
            self.config.key_prefix,
            hasher.finalize()
        )
    }

    // =========================================================================
    // Entry Points
    // =========================================================================

    /// Get a cached profile if present and not expired
    pub fn get(&self, identifier: &str) -> Option<Profile> {
        let key = self.derive_key(identifier);
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        match entries.get(&key) {
            Some(entry) if entry.inserted.elapsed() < self.config.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.profile.clone())
            }
            Some(_) => {
                // Expired; evict on read
                entries.remove(&key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert a profile, evicting the oldest entry if at capacity
    pub fn insert(&self, identifier: &str, profile: Profile) {
        let key = self.derive_key(identifier);
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        if !entries.contains_key(&key) && entries.len() >= self.config.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }

        entries.insert(
            key,
            CachedProfile {
                profile,
                inserted: Instant::now(),
                cached_at: Utc::now(),
            },
        );
    }

    /// Get a profile from the cache, computing and caching it on a miss
    ///
    /// The compute closure runs only on a miss; its failure is returned
    /// unchanged and nothing is cached.
    pub async fn get_or_compute<F, Fut>(
        &self,
        identifier: &str,
        compute_fn: F,
    ) -> Result<Profile, LookupError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Profile, LookupError>>,
    {
        if let Some(profile) = self.get(identifier) {
            tracing::debug!(identifier = %identifier, "Profile cache hit");
            return Ok(profile);
        }

        tracing::debug!(identifier = %identifier, "Profile cache miss");

        let profile = compute_fn().await?;
        self.insert(identifier, profile.clone());

        Ok(profile)
    }

    /// Remove a single entry
    pub fn invalidate(&self, identifier: &str) -> bool {
        let key = self.derive_key(identifier);
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(&key).is_some()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Number of live entries (including not-yet-evicted expired ones)
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the given identifier was cached, if present
    pub fn cached_at(&self, identifier: &str) -> Option<DateTime<Utc>> {
        let key = self.derive_key(identifier);
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.get(&key).map(|e| e.cached_at)
    }

    /// Snapshot of hit/miss statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Get config reference
    pub fn config(&self) -> &ProfileCacheConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(login: &str) -> Profile {
        Profile {
            login: login.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_key_stable_and_case_insensitive() {
        let cache = ProfileCache::new(ProfileCacheConfig::default());

        let k1 = cache.derive_key("Octocat");
        let k2 = cache.derive_key("octocat");
        let k3 = cache.derive_key("someone-else");

        assert_eq!(k1, k2);
        assert_ne!(k1, k3);
        assert!(k1.starts_with("lookout:profile:"));
    }

    #[test]
    fn test_insert_then_get() {
        let cache = ProfileCache::new(ProfileCacheConfig::default());
        assert!(cache.get("octocat").is_none());

        cache.insert("octocat", profile("octocat"));
        let hit = cache.get("octocat").unwrap();
        assert_eq!(hit.login, "octocat");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_ttl_expiry_on_read() {
        let cache = ProfileCache::new(ProfileCacheConfig {
            ttl: Duration::ZERO,
            ..Default::default()
        });

        cache.insert("octocat", profile("octocat"));
        assert!(cache.get("octocat").is_none());
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = ProfileCache::new(ProfileCacheConfig {
            capacity: 2,
            ..Default::default()
        });

        cache.insert("first", profile("first"));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("second", profile("second"));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("third", profile("third"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("first").is_none());
        assert!(cache.get("second").is_some());
        assert!(cache.get("third").is_some());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ProfileCache::new(ProfileCacheConfig::default());
        cache.insert("a", profile("a"));
        cache.insert("b", profile("b"));

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_compute_runs_once() {
        let cache = ProfileCache::new(ProfileCacheConfig::default());
        let calls = AtomicU64::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_compute("octocat", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(profile("octocat"))
                })
                .await;
            assert!(result.is_ok());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_failure_not_cached() {
        let cache = ProfileCache::new(ProfileCacheConfig::default());

        let result = cache
            .get_or_compute("missing", || async { Err(LookupError::Status(404)) })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 75,
            misses: 25,
            evictions: 0,
        };
        assert!((stats.hit_rate() - 0.75).abs() < 0.001);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
