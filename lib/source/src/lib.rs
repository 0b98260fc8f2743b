//! # curata Source
//!
//! Candidate sourcing for the curata taste engine. The engine itself only
//! consumes an already-resolved candidate list; everything here sits behind
//! the [`CandidateSource`] trait so the engine never depends on catalog or
//! cache topology.

use async_trait::async_trait;

use curata_core::{ArtworkCandidate, Result, Style};

pub mod artic;
pub mod cache;
pub mod profile;
pub mod synthetic;

pub use artic::ArticSource;
pub use cache::{cache_key, CachedSource, CandidateCache, MemoryCache, DEFAULT_CACHE_TTL_MINUTES};
pub use profile::{MemoryProfileStore, ProfileStore};
pub use synthetic::SyntheticSource;

/// Supplies candidate artworks for a style filter.
///
/// Implementations may return a possibly-cached, possibly-shuffled superset
/// or fewer results than requested; callers must tolerate both.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch(&self, styles: &[Style], desired: usize) -> Result<Vec<ArtworkCandidate>>;
}
