//! Signing-key resolution with a process-wide key-set cache.
//!
//! ```text
//! kid → cached set fresh? ── yes → lookup ── hit → key
//!                │                   └─ miss → refetch (rate limited) → lookup
//!                └─ no → fetch → lookup
//! ```
//!
//! A miss against a cached set triggers one refetch so a provider key rotation
//! is picked up before the TTL runs out. Fetch failures fail closed.
//!
//! Fetches are serialized. Callers that queued behind a fetch take its
//! outcome, failed or not, instead of starting another one.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::source::{KeySetError, KeySetSource};
use super::types::{KeySet, SigningKey};
use crate::services::auth::error::AuthError;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    // `None` disables caching: every lookup fetches.
    pub ttl: Option<Duration>,
    // Minimum spacing between refetches triggered by an unknown kid.
    pub min_refresh_interval: Duration,
}

impl CachePolicy {
    pub fn disabled() -> Self {
        Self {
            ttl: None,
            min_refresh_interval: Duration::ZERO,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Some(DEFAULT_CACHE_TTL),
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        }
    }
}

struct CachedKeySet {
    keys: Arc<KeySet>,
    fetched_at: Instant,
}

// Outcome of the latest completed fetch.
struct Attempt {
    generation: u64,
    outcome: Result<Arc<KeySet>, Arc<KeySetError>>,
}

pub struct KeySetProvider {
    source: Arc<dyn KeySetSource>,
    policy: CachePolicy,
    cached: RwLock<Option<CachedKeySet>>,
    // Held for the duration of a fetch.
    refresh: Mutex<Option<Attempt>>,
    // Bumped under `refresh` each time a fetch completes.
    generation: AtomicU64,
}

impl std::fmt::Debug for KeySetProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySetProvider")
            .field("source", &self.source.describe())
            .field("policy", &self.policy)
            .finish()
    }
}

impl KeySetProvider {
    pub fn new(source: Arc<dyn KeySetSource>, policy: CachePolicy) -> Self {
        Self {
            source,
            policy,
            cached: RwLock::new(None),
            refresh: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Resolve the signing key for a token's `kid`.
    ///
    /// Errors:
    /// - `KeyNotFound` when no usable entry matches (also for a missing `kid`)
    /// - `ProviderUnavailable` when the key set cannot be fetched or decoded
    pub async fn signing_key(&self, kid: Option<&str>) -> Result<SigningKey, AuthError> {
        let Some(kid) = kid else {
            return Err(AuthError::KeyNotFound { kid: None });
        };

        let (keys, fresh) = self.key_set().await?;
        if let Some(key) = keys.find_signing_key(kid) {
            return Ok(key);
        }

        if !fresh && self.may_refresh_on_miss().await {
            debug!(kid, "kid not in cached key set, refetching");
            let keys = self.refetch().await?;
            if let Some(key) = keys.find_signing_key(kid) {
                return Ok(key);
            }
        }

        Err(AuthError::KeyNotFound {
            kid: Some(kid.to_owned()),
        })
    }

    // Returns the key set and whether it was fetched by this call.
    async fn key_set(&self) -> Result<(Arc<KeySet>, bool), AuthError> {
        if let Some(keys) = self.cached_if_fresh().await {
            return Ok((keys, false));
        }
        Ok((self.refetch().await?, true))
    }

    async fn cached_if_fresh(&self) -> Option<Arc<KeySet>> {
        let ttl = self.policy.ttl?;
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < ttl)
            .map(|c| Arc::clone(&c.keys))
    }

    async fn may_refresh_on_miss(&self) -> bool {
        match self.cached.read().await.as_ref() {
            Some(c) => c.fetched_at.elapsed() >= self.policy.min_refresh_interval,
            None => true,
        }
    }

    async fn refetch(&self) -> Result<Arc<KeySet>, AuthError> {
        let seen = self.generation.load(Ordering::Acquire);
        let mut last = self.refresh.lock().await;

        // A fetch completed while we waited for the lock.
        if let Some(attempt) = last.as_ref()
            && attempt.generation != seen
        {
            debug!(
                endpoint = self.source.describe(),
                ok = attempt.outcome.is_ok(),
                "reusing concurrent key set fetch"
            );
            return attempt.outcome.clone().map_err(AuthError::ProviderUnavailable);
        }

        let outcome = match self.source.fetch().await {
            Ok(keys) => {
                let keys = Arc::new(keys);
                debug!(
                    endpoint = self.source.describe(),
                    count = keys.keys.len(),
                    "fetched key set"
                );
                if self.policy.ttl.is_some() {
                    *self.cached.write().await = Some(CachedKeySet {
                        keys: Arc::clone(&keys),
                        fetched_at: Instant::now(),
                    });
                }
                Ok(keys)
            }
            Err(err) => {
                warn!(endpoint = self.source.describe(), error = %err, "key set fetch failed");
                Err(Arc::new(err))
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        *last = Some(Attempt {
            generation,
            outcome: outcome.clone(),
        });

        outcome.map_err(AuthError::ProviderUnavailable)
    }
}
