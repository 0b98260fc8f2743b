//! # curata
//!
//! An active taste-preference engine for art recommendation.
//!
//! curata runs a short onboarding: it shows a user pairs of artworks, learns
//! an implicit preference vector from their forced choices, and blends that
//! with their declared category preferences to rank a candidate pool.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install curata
//! curata --http-port 8080 --offline
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use curata::prelude::*;
//!
//! // Build a pool and learn from one choice.
//! let ids: Vec<String> = (0..12).map(|i| format!("art_{:03}", i + 1)).collect();
//! let pool = ArtworkCandidate::synthetic_pool(&ids);
//! let history = vec![PairChoice::new("art_001", "art_002", 1)];
//! let user = learn_user_embedding(&pool, &history, &LearnerConfig::default());
//!
//! // Rank the pool against the learned vector.
//! let ranked = rank(score_pool(
//!     &pool,
//!     &user,
//!     &PreferenceVectors::empty(),
//!     &ScoringWeights::default(),
//! ));
//! assert_eq!(ranked.len(), 12);
//! ```
//!
//! ## Crate Structure
//!
//! curata is composed of several crates:
//!
//! - `curata-core` - Vector math, taxonomies, pair selection, learning, scoring
//! - `curata-session` - TTL-scoped in-memory session store
//! - `curata-source` - Candidate sourcing, caching, profile persistence
//! - `curata-api` - Engine orchestration and the REST API

// Re-export core types
pub use curata_core::{
    build_summary, exposure_counts, learn_user_embedding, rank, score_pool, select_next_pair,
    uncertainty_scores, ArtworkCandidate, Clock, Color, DeclaredSelections, Error, Facet,
    LearnerConfig, ManualClock, Medium, PairChoice, PairRationale, PreferenceVectors, Result,
    ScoreResult, ScoringWeights, SelectedPair, SelectionContext, Style, SystemClock, TasteSummary,
    Vector,
};

// Re-export session state
pub use curata_session::{SessionRecord, SessionStore, SessionTelemetry};

// Re-export sourcing
pub use curata_source::{
    ArticSource, CachedSource, CandidateCache, CandidateSource, MemoryCache, MemoryProfileStore,
    ProfileStore, SyntheticSource,
};

// Re-export API
pub use curata_api::{EngineConfig, RestApi, TasteEngine};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_summary, learn_user_embedding, rank, score_pool, select_next_pair,
        ArtworkCandidate, Clock, Color, DeclaredSelections, EngineConfig, Error, LearnerConfig,
        Medium, PairChoice, PreferenceVectors, RestApi, Result, ScoringWeights, SessionStore,
        Style, SystemClock, TasteEngine, TasteSummary, Vector,
    };
}
