//! Hybrid candidate scoring
//!
//! Combines learned embedding similarity with declared categorical affinity:
//! `score = w1 * similarity + w2 * prior`, where the prior blends color
//! cosine with medium and style Jaccard overlap.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkCandidate;
use crate::preference::PreferenceVectors;
use crate::vector::Vector;

/// Scoring weight policy. `alpha`/`beta`/`gamma` blend the prior's color,
/// medium, and style terms; `w1`/`w2` blend similarity against the prior.
/// Both groups sum to 1 by convention, though nothing enforces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
    pub w1: f32,
    pub w2: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.4,
            gamma: 0.3,
            w1: 0.6,
            w2: 0.4,
        }
    }
}

/// Jaccard index over the vectors' positive-support index sets.
///
/// The vectors are read as set-membership indicators, not magnitudes.
/// Defined as 0 when both sets are empty.
#[must_use]
pub fn jaccard_index(a: &Vector, b: &Vector) -> f32 {
    let set_a = a.support();
    let set_b = b.support();
    if set_a.is_empty() && set_b.is_empty() {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f32 / union as f32
}

/// Categorical affinity between declared preferences and a candidate.
#[must_use]
pub fn prior_score(
    candidate: &ArtworkCandidate,
    preferences: &PreferenceVectors,
    weights: &ScoringWeights,
) -> f32 {
    let color = preferences.colors.cosine_similarity(&candidate.color_vector);
    let medium = jaccard_index(&preferences.mediums, &candidate.medium_vector);
    let style = jaccard_index(&preferences.styles, &candidate.style_vector);

    weights.alpha * color + weights.beta * medium + weights.gamma * style
}

/// Learned-embedding affinity between the user and a candidate.
#[must_use]
pub fn similarity_score(user_embedding: &Vector, candidate: &ArtworkCandidate) -> f32 {
    user_embedding.cosine_similarity(&candidate.embedding)
}

/// Per-candidate score with its two components. Derived, never persisted
/// independently of the ranking pass that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub artwork_id: String,
    pub score: f32,
    pub prior_score: f32,
    pub similarity_score: f32,
}

#[must_use]
pub fn score_candidate(
    candidate: &ArtworkCandidate,
    user_embedding: &Vector,
    preferences: &PreferenceVectors,
    weights: &ScoringWeights,
) -> ScoreResult {
    let prior = prior_score(candidate, preferences, weights);
    let similarity = similarity_score(user_embedding, candidate);

    ScoreResult {
        artwork_id: candidate.id.clone(),
        score: weights.w1 * similarity + weights.w2 * prior,
        prior_score: prior,
        similarity_score: similarity,
    }
}

#[must_use]
pub fn score_pool(
    pool: &[ArtworkCandidate],
    user_embedding: &Vector,
    preferences: &PreferenceVectors,
    weights: &ScoringWeights,
) -> Vec<ScoreResult> {
    pool.iter()
        .map(|candidate| score_candidate(candidate, user_embedding, preferences, weights))
        .collect()
}

/// Order results descending by combined score.
///
/// Equal scores fall back to ascending artwork id. The tiebreak is a local
/// contract, chosen so repeated runs over the same pool produce identical
/// orderings; callers must not rely on any other ordering between ties.
#[must_use]
pub fn rank(mut results: Vec<ScoreResult>) -> Vec<ScoreResult> {
    results.sort_by(|a, b| {
        OrderedFloat(b.score)
            .cmp(&OrderedFloat(a.score))
            .then_with(|| a.artwork_id.cmp(&b.artwork_id))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Color, Medium, Style};

    fn candidate(id: &str, mediums: Vec<Medium>, styles: Vec<Style>) -> ArtworkCandidate {
        ArtworkCandidate::from_facets(id, format!("{id}_artist"), Vec::new(), mediums, styles)
    }

    #[test]
    fn test_jaccard_empty_sets_is_zero() {
        let a = Vector::zeros(5);
        let b = Vector::zeros(5);
        assert_eq!(jaccard_index(&a, &b), 0.0);
    }

    #[test]
    fn test_jaccard_uses_support_not_magnitude() {
        let a = Vector::new(vec![0.9, 0.0, 0.1]);
        let b = Vector::new(vec![0.1, 0.0, 0.9]);
        assert!((jaccard_index(&a, &b) - 1.0).abs() < 1e-6);

        let c = Vector::new(vec![1.0, 0.0, 0.0]);
        let d = Vector::new(vec![1.0, 1.0, 0.0]);
        assert!((jaccard_index(&c, &d) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pure_similarity_ranking() {
        let mut near = candidate("near", vec![Medium::Painting], vec![Style::Modern]);
        let mut far = candidate("far", vec![Medium::Painting], vec![Style::Modern]);
        near.embedding = Vector::new(vec![1.0, 0.0]);
        far.embedding = Vector::new(vec![0.0, 1.0]);
        let pool = vec![far.clone(), near.clone()];

        let user = Vector::new(vec![1.0, 0.0]);
        let weights = ScoringWeights {
            w1: 1.0,
            w2: 0.0,
            ..ScoringWeights::default()
        };
        let ranked = rank(score_pool(&pool, &user, &PreferenceVectors::empty(), &weights));
        assert_eq!(ranked[0].artwork_id, "near");
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
        assert_eq!(ranked[1].artwork_id, "far");
    }

    #[test]
    fn test_pure_prior_ranking_depends_on_overlap_only() {
        let matching = candidate("match", vec![Medium::Sculpture], vec![Style::Cubist]);
        let other = candidate("other", vec![Medium::Painting], vec![Style::Pop]);
        let pool = vec![other.clone(), matching.clone()];

        // User embedding points straight at "other", but w1 = 0 ignores it.
        let user = other.embedding.clone();
        let preferences = PreferenceVectors::from_selections(
            &[],
            &[Medium::Sculpture],
            &[Style::Cubist],
        );
        let weights = ScoringWeights {
            w1: 0.0,
            w2: 1.0,
            ..ScoringWeights::default()
        };
        let ranked = rank(score_pool(&pool, &user, &preferences, &weights));
        assert_eq!(ranked[0].artwork_id, "match");
        assert_eq!(ranked[0].similarity_score, user.cosine_similarity(&matching.embedding));
    }

    #[test]
    fn test_score_components_recorded() {
        let c = candidate("c", vec![Medium::Painting], vec![Style::Modern]);
        let user = c.embedding.clone();
        let preferences =
            PreferenceVectors::from_selections(&[], &[Medium::Painting], &[Style::Modern]);
        let weights = ScoringWeights::default();

        let result = score_candidate(&c, &user, &preferences, &weights);
        let expected =
            weights.w1 * result.similarity_score + weights.w2 * result.prior_score;
        assert!((result.score - expected).abs() < 1e-6);
        assert!((result.similarity_score - 1.0).abs() < 1e-6);
        // Medium and style overlap are exact; color contributes nothing.
        let expected_prior = weights.beta + weights.gamma;
        assert!((result.prior_score - expected_prior).abs() < 1e-6);
    }

    #[test]
    fn test_rank_ties_break_on_ascending_id() {
        let results = vec![
            ScoreResult {
                artwork_id: "b".into(),
                score: 0.5,
                prior_score: 0.0,
                similarity_score: 0.0,
            },
            ScoreResult {
                artwork_id: "a".into(),
                score: 0.5,
                prior_score: 0.0,
                similarity_score: 0.0,
            },
            ScoreResult {
                artwork_id: "c".into(),
                score: 0.9,
                prior_score: 0.0,
                similarity_score: 0.0,
            },
        ];
        let ranked = rank(results);
        assert_eq!(ranked[0].artwork_id, "c");
        assert_eq!(ranked[1].artwork_id, "a");
        assert_eq!(ranked[2].artwork_id, "b");
    }
}
