//! Engine orchestration
//!
//! Ties the session store, candidate source, and core algorithms into the
//! three engine operations: start, next, finish. External fetch failures
//! are never fatal here; the deterministic synthetic pool stands in so the
//! selector and scorer always have something to operate on.

use ahash::AHashMap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use curata_core::{
    build_summary, exposure_counts, last_winner_artist, learn_user_embedding, rank, score_pool,
    seen_attributes, select_next_pair, skip_count, uncertainty_scores, ArtworkCandidate, Clock,
    DeclaredSelections, Error, LearnerConfig, PreferenceVectors, Result, ScoringWeights,
    SelectionContext, Style,
};
use curata_session::SessionStore;
use curata_source::{CandidateSource, ProfileStore};

use crate::types::{
    BlendWeights, FinishRequest, FinishResponse, NextRequest, NextResponse, PresentedPair,
    StartRequest, StartResponse,
};

/// Engine policy knobs. All of these are configuration, not structure.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub total_rounds: u32,
    pub max_skips: usize,
    /// Distinct styles that must appear before the diversity guard relaxes.
    pub required_unique_styles: usize,
    /// Pool size requested from the candidate source on refresh.
    pub candidate_count: usize,
    /// Size of the placeholder id list a session starts with.
    pub start_pool_size: usize,
    pub weights: ScoringWeights,
    pub learner: LearnerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_rounds: 7,
            max_skips: 1,
            required_unique_styles: 3,
            candidate_count: 90,
            start_pool_size: 12,
            weights: ScoringWeights::default(),
            learner: LearnerConfig::default(),
        }
    }
}

/// The taste preference engine.
///
/// Stateless between calls apart from the session store. Assumes sequential
/// use per session id; racing rounds on one session are last-writer-wins on
/// history.
pub struct TasteEngine {
    store: SessionStore,
    source: Arc<dyn CandidateSource>,
    profiles: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    rng: Mutex<StdRng>,
}

impl TasteEngine {
    #[must_use]
    pub fn new(
        store: SessionStore,
        source: Arc<dyn CandidateSource>,
        profiles: Arc<dyn ProfileStore>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            source,
            profiles,
            clock,
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replace the entropy-seeded generator with a fixed seed so pair
    /// selection becomes reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Open a new onboarding session.
    pub async fn start(&self, req: StartRequest) -> Result<StartResponse> {
        if req.user_id.trim().is_empty() {
            return Err(Error::InvalidRequest("userId is required".to_string()));
        }

        let preferences = req
            .preference_vectors
            .map(|partial| partial.merged())
            .unwrap_or_else(PreferenceVectors::empty);
        let candidate_ids: Vec<String> = (0..self.config.start_pool_size)
            .map(|i| format!("art_{:03}", i + 1))
            .collect();

        let record = self.store.create(&req.user_id, candidate_ids, preferences);
        info!(session_id = %record.id, user_id = %record.user_id, "taste session started");

        Ok(StartResponse {
            session_id: record.id,
            candidate_ids: record.candidate_ids,
            expires_at: record.expires_at,
        })
    }

    /// Record the authoritative history and produce the next comparison
    /// pair.
    pub async fn next(&self, req: NextRequest) -> Result<NextResponse> {
        if req.session_id.is_empty() {
            return Err(Error::InvalidRequest("sessionId is required".to_string()));
        }
        let session = self
            .store
            .get(&req.session_id)
            .ok_or_else(|| Error::SessionNotFound(req.session_id.clone()))?;
        let mut session = self.store.replace_history(&session.id, req.history)?;

        let styles: Vec<Style> = if req.styles.is_empty() {
            session.active_styles.clone().unwrap_or_default()
        } else {
            req.styles
        };

        if session.candidates.is_none() || session.styles_changed(&styles) {
            match self.source.fetch(&styles, self.config.candidate_count).await {
                Ok(fetched) if fetched.len() >= 2 => {
                    session = self.store.set_candidates(&session.id, fetched, styles)?;
                }
                Ok(fetched) => {
                    warn!(
                        session_id = %session.id,
                        got = fetched.len(),
                        "candidate fetch too thin, keeping previous pool"
                    );
                }
                Err(err) => {
                    warn!(session_id = %session.id, %err, "candidate fetch failed, using synthetic pool");
                }
            }
        }

        let pool: Vec<ArtworkCandidate> = match &session.candidates {
            Some(candidates) if candidates.len() >= 2 => candidates.clone(),
            _ => ArtworkCandidate::synthetic_pool(&session.candidate_ids),
        };

        let exposure = exposure_counts(&session.history);
        let uncertainty = uncertainty_scores(&pool, &exposure);
        let by_id: AHashMap<&str, &ArtworkCandidate> =
            pool.iter().map(|c| (c.id.as_str(), c)).collect();
        let (seen_styles, seen_artists) = seen_attributes(&session.history, &by_id);
        debug!(
            session_id = %session.id,
            pool = pool.len(),
            seen_styles = seen_styles.len(),
            seen_artists = seen_artists.len(),
            "selecting next pair"
        );

        let ctx = SelectionContext {
            pool: &pool,
            exposure: &exposure,
            uncertainty: &uncertainty,
            last_artist_id: last_winner_artist(&session.history, &by_id),
            seen_styles: &seen_styles,
            required_unique_styles: self.config.required_unique_styles,
        };
        let pair = {
            let mut rng = self.rng.lock();
            select_next_pair(&ctx, &mut *rng)
        }
        .ok_or_else(|| {
            Error::InsufficientCandidates(format!(
                "cannot form a pair from {} candidates",
                pool.len()
            ))
        })?;

        let anchor = by_id.get(pair.anchor_id.as_str()).ok_or_else(|| {
            Error::Inconsistency(format!("selected id {} missing from pool", pair.anchor_id))
        })?;
        let challenger = by_id.get(pair.challenger_id.as_str()).ok_or_else(|| {
            Error::Inconsistency(format!(
                "selected id {} missing from pool",
                pair.challenger_id
            ))
        })?;

        Ok(NextResponse {
            round: session.history.len() as u32 + 1,
            total_rounds: self.config.total_rounds,
            pair: PresentedPair {
                artwork_a: (*anchor).into(),
                artwork_b: (*challenger).into(),
                allow_skip: skip_count(&session.history) < self.config.max_skips,
            },
            session_id: session.id,
        })
    }

    /// Learn, rank, summarize, and close the session.
    pub async fn finish(&self, req: FinishRequest) -> Result<FinishResponse> {
        if req.session_id.is_empty() {
            return Err(Error::InvalidRequest("sessionId is required".to_string()));
        }
        let session = self
            .store
            .get(&req.session_id)
            .ok_or_else(|| Error::SessionNotFound(req.session_id.clone()))?;

        let selections = DeclaredSelections {
            colors: req.colors,
            mediums: req.mediums,
            styles: req.styles,
        };
        let preferences = PreferenceVectors::from_selections(
            &selections.colors,
            &selections.mediums,
            &selections.styles,
        );

        let pool: Vec<ArtworkCandidate> = match &session.candidates {
            Some(candidates) if !candidates.is_empty() => candidates.clone(),
            _ => ArtworkCandidate::synthetic_pool(&session.candidate_ids),
        };

        let user_vector = learn_user_embedding(&pool, &req.pairs, &self.config.learner);
        let ranked = rank(score_pool(
            &pool,
            &user_vector,
            &preferences,
            &self.config.weights,
        ));

        self.store.mark_complete(&session.id, req.telemetry.clone())?;

        let summary = build_summary(&ranked, &selections, &req.pairs);
        let weights = BlendWeights {
            w_embed: self.config.weights.w1,
            w_attr: self.config.weights.w2,
        };

        let blob = serde_json::json!({
            "tasteTest": {
                "completed": true,
                "completedAt": self.clock.now(),
                "selections": &selections,
                "summary": &summary,
                "userVector": &user_vector,
                "weights": weights,
                "telemetry": &req.telemetry,
            }
        });
        if let Err(err) = self.profiles.save(&session.user_id, blob).await {
            warn!(user_id = %session.user_id, %err, "failed to persist taste completion");
        }

        info!(session_id = %session.id, "taste session completed");
        Ok(FinishResponse {
            session_id: session.id,
            summary,
            user_vector,
            weights,
        })
    }
}
