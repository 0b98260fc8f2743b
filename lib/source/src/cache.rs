//! Two-tier candidate cache
//!
//! Candidate pools are expensive to assemble, so fetches go through an
//! in-memory TTL tier and an optional external tier, both behind the same
//! [`CandidateCache`] interface. The wrapped source is only consulted when
//! every tier misses.

use ahash::AHashMap;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::warn;

use curata_core::{ArtworkCandidate, Clock, Facet, Result, Style};

use crate::CandidateSource;

pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 10;

/// Cache key for a style filter: sorted labels joined with `|`, or `all`.
#[must_use]
pub fn cache_key(styles: &[Style]) -> String {
    if styles.is_empty() {
        return "all".to_string();
    }
    let mut labels: Vec<&str> = styles.iter().map(|style| style.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    labels.join("|")
}

/// One tier of candidate caching: opaque get/set with a TTL.
#[async_trait]
pub trait CandidateCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Vec<ArtworkCandidate>>;
    async fn set(&self, key: &str, candidates: Vec<ArtworkCandidate>, ttl: Duration);
}

struct CacheEntry {
    stored_at: DateTime<Utc>,
    ttl: Duration,
    candidates: Vec<ArtworkCandidate>,
}

/// In-process cache tier with lazy TTL eviction.
pub struct MemoryCache {
    entries: RwLock<AHashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(AHashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl CandidateCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<ArtworkCandidate>> {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if now - entry.stored_at >= entry.ttl => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.candidates.clone()),
            None => None,
        }
    }

    async fn set(&self, key: &str, candidates: Vec<ArtworkCandidate>, ttl: Duration) {
        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                stored_at: self.clock.now(),
                ttl,
                candidates,
            },
        );
    }
}

/// A [`CandidateSource`] wrapped with the two cache tiers.
pub struct CachedSource<S> {
    inner: S,
    memory: MemoryCache,
    external: Option<Arc<dyn CandidateCache>>,
    ttl: Duration,
}

impl<S: CandidateSource> CachedSource<S> {
    #[must_use]
    pub fn new(inner: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            memory: MemoryCache::new(clock),
            external: None,
            ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
        }
    }

    /// Attach an external tier, checked after the in-memory one.
    #[must_use]
    pub fn with_external(mut self, external: Arc<dyn CandidateCache>) -> Self {
        self.external = Some(external);
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[async_trait]
impl<S: CandidateSource> CandidateSource for CachedSource<S> {
    async fn fetch(&self, styles: &[Style], desired: usize) -> Result<Vec<ArtworkCandidate>> {
        let key = cache_key(styles);

        if let Some(cached) = self.memory.get(&key).await {
            return Ok(truncated(cached, desired));
        }

        if let Some(external) = &self.external {
            if let Some(cached) = external.get(&key).await {
                self.memory.set(&key, cached.clone(), self.ttl).await;
                return Ok(truncated(cached, desired));
            }
        }

        let fetched = self.inner.fetch(styles, desired).await?;
        self.memory.set(&key, fetched.clone(), self.ttl).await;
        if let Some(external) = &self.external {
            external.set(&key, fetched.clone(), self.ttl).await;
        }
        if fetched.len() < desired {
            warn!(
                key = %key,
                got = fetched.len(),
                desired,
                "candidate fetch returned fewer results than requested"
            );
        }
        Ok(fetched)
    }
}

fn truncated(mut candidates: Vec<ArtworkCandidate>, desired: usize) -> Vec<ArtworkCandidate> {
    candidates.truncate(desired);
    candidates
}
