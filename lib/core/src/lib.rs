//! # curata Core
//!
//! Core library for the curata taste preference engine.
//!
//! This crate provides the algorithms and data model:
//!
//! - [`Vector`] - Dense vector math with tolerant length handling
//! - [`ArtworkCandidate`] - A candidate with embedding and categorical sub-vectors
//! - [`PreferenceVectors`] - Declared selections encoded over the taxonomies
//! - [`select_next_pair`] - Active anchor/challenger pair selection
//! - [`learn_user_embedding`] - Online contrastive preference learning
//! - [`score_pool`] / [`rank`] - Hybrid similarity + prior ranking
//! - [`build_summary`] - Final session digest
//!
//! ## Example
//!
//! ```rust
//! use curata_core::{
//!     learn_user_embedding, rank, score_pool, ArtworkCandidate, LearnerConfig,
//!     PairChoice, PreferenceVectors, ScoringWeights,
//! };
//!
//! let ids: Vec<String> = (0..4).map(|i| format!("art_{i}")).collect();
//! let pool = ArtworkCandidate::synthetic_pool(&ids);
//!
//! let history = vec![PairChoice::new("art_0", "art_1", 1)];
//! let user = learn_user_embedding(&pool, &history, &LearnerConfig::default());
//!
//! let ranked = rank(score_pool(
//!     &pool,
//!     &user,
//!     &PreferenceVectors::empty(),
//!     &ScoringWeights::default(),
//! ));
//! assert_eq!(ranked.len(), 4);
//! ```

pub mod artwork;
pub mod choice;
pub mod clock;
pub mod error;
pub mod learner;
pub mod preference;
pub mod scoring;
pub mod selection;
pub mod summary;
pub mod taxonomy;
pub mod vector;

pub use artwork::{combined_embedding, ArtworkCandidate};
pub use choice::{exposure_counts, last_winner_artist, seen_attributes, skip_count, PairChoice};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use learner::{learn_user_embedding, LearnerConfig};
pub use preference::{encode_selection, DeclaredSelections, PreferenceVectors};
pub use scoring::{
    jaccard_index, prior_score, rank, score_candidate, score_pool, similarity_score, ScoreResult,
    ScoringWeights,
};
pub use selection::{
    select_next_pair, uncertainty_scores, PairRationale, SelectedPair, SelectionContext,
};
pub use summary::{build_summary, stability_score, SummaryFacets, TasteSummary};
pub use taxonomy::{Color, Facet, Medium, Style};
pub use vector::Vector;
