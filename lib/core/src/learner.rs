//! Online contrastive preference learning
//!
//! Folds the ordered pairwise choice history into a single user embedding:
//! each non-skipped choice nudges the vector toward the winner and away from
//! the loser, with exponential decay bounding its growth over many rounds.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkCandidate;
use crate::choice::PairChoice;
use crate::vector::Vector;

/// Tunable learning policy. The defaults are policy, not structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearnerConfig {
    pub learning_rate: f32,
    pub decay: f32,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            decay: 1e-4,
        }
    }
}

/// Derive the user embedding from the full choice history.
///
/// The vector is sized to the first pool candidate's embedding dimension.
/// Skipped choices and choices whose ids no longer resolve in the pool are
/// passed over silently; candidate data may have been pruned between rounds
/// and one stale entry must not fail the whole computation. Deterministic
/// given the same ordered history and pool.
#[must_use]
pub fn learn_user_embedding(
    pool: &[ArtworkCandidate],
    history: &[PairChoice],
    config: &LearnerConfig,
) -> Vector {
    let by_id: AHashMap<&str, &ArtworkCandidate> =
        pool.iter().map(|candidate| (candidate.id.as_str(), candidate)).collect();

    let dim = pool.first().map(|c| c.embedding.dim()).unwrap_or(0);
    let mut values = vec![0.0f32; dim];

    for choice in history {
        if choice.skipped {
            continue;
        }
        let (Some(winner), Some(loser)) = (
            by_id.get(choice.winner_id.as_str()),
            by_id.get(choice.loser_id.as_str()),
        ) else {
            continue;
        };

        for (i, value) in values.iter_mut().enumerate() {
            let gradient = winner.embedding.get(i) - loser.embedding.get(i);
            *value = *value * (1.0 - config.decay) + config.learning_rate * gradient;
        }
    }

    Vector::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Color, Medium, Style};

    fn candidate(id: &str, embedding: Vec<f32>) -> ArtworkCandidate {
        let mut c = ArtworkCandidate::from_facets(
            id,
            format!("{id}_artist"),
            Vec::<Color>::new(),
            Vec::<Medium>::new(),
            Vec::<Style>::new(),
        );
        c.embedding = Vector::new(embedding);
        c
    }

    #[test]
    fn test_single_choice_reference_update() {
        let pool = vec![candidate("a", vec![1.0, 0.0]), candidate("b", vec![0.0, 1.0])];
        let history = vec![PairChoice::new("a", "b", 1)];
        let config = LearnerConfig::default();

        let user = learn_user_embedding(&pool, &history, &config);
        assert!((user.get(0) - 0.05).abs() < 1e-6);
        assert!((user.get(1) + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_skipped_choices_contribute_nothing() {
        let pool = vec![candidate("a", vec![1.0, 0.0]), candidate("b", vec![0.0, 1.0])];
        let history = vec![PairChoice::new("a", "b", 1).skipped()];
        let user = learn_user_embedding(&pool, &history, &LearnerConfig::default());
        assert_eq!(user, Vector::zeros(2));
    }

    #[test]
    fn test_unresolvable_ids_are_passed_over() {
        let pool = vec![candidate("a", vec![1.0, 0.0]), candidate("b", vec![0.0, 1.0])];
        let history = vec![
            PairChoice::new("a", "pruned", 1),
            PairChoice::new("a", "b", 2),
        ];
        let user = learn_user_embedding(&pool, &history, &LearnerConfig::default());
        // Only the second choice lands.
        assert!((user.get(0) - 0.05).abs() < 1e-6);
        assert!((user.get(1) + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_decay_bounds_repeated_updates() {
        let pool = vec![candidate("a", vec![1.0, 0.0]), candidate("b", vec![0.0, 1.0])];
        let history: Vec<PairChoice> = (0..1000)
            .map(|round| PairChoice::new("a", "b", round + 1))
            .collect();
        let config = LearnerConfig::default();
        let user = learn_user_embedding(&pool, &history, &config);
        // Fixed point of v = v * (1 - decay) + lr is lr / decay.
        let ceiling = config.learning_rate / config.decay;
        assert!(user.get(0) > 0.0);
        assert!(user.get(0) < ceiling);
    }

    #[test]
    fn test_shorter_embeddings_degrade_to_zero_components() {
        let pool = vec![
            candidate("a", vec![1.0, 0.0, 0.5]),
            candidate("b", vec![0.0]),
        ];
        let history = vec![PairChoice::new("a", "b", 1)];
        let user = learn_user_embedding(&pool, &history, &LearnerConfig::default());
        assert_eq!(user.dim(), 3);
        assert!((user.get(2) - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_empty_pool_yields_empty_vector() {
        let user = learn_user_embedding(&[], &[], &LearnerConfig::default());
        assert_eq!(user.dim(), 0);
    }
}
