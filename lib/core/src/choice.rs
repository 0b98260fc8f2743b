//! Pairwise choice history

use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkCandidate;
use crate::taxonomy::Style;

/// One recorded comparison: the user preferred `winner_id` over `loser_id`.
///
/// History is append-only and ordered by round. A skipped entry still
/// reserves its round and counts toward exposure, but carries no learning
/// signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairChoice {
    pub winner_id: String,
    pub loser_id: String,
    pub round: u32,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PairChoice {
    #[must_use]
    pub fn new(winner_id: impl Into<String>, loser_id: impl Into<String>, round: u32) -> Self {
        Self {
            winner_id: winner_id.into(),
            loser_id: loser_id.into(),
            round,
            skipped: false,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }
}

/// How many times each candidate appeared in history, as winner or loser.
/// Skipped rounds count: both artworks were still shown.
#[must_use]
pub fn exposure_counts(history: &[PairChoice]) -> AHashMap<String, u32> {
    let mut counts = AHashMap::new();
    for choice in history {
        *counts.entry(choice.winner_id.clone()).or_insert(0) += 1;
        *counts.entry(choice.loser_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of skipped rounds so far.
#[must_use]
pub fn skip_count(history: &[PairChoice]) -> usize {
    history.iter().filter(|choice| choice.skipped).count()
}

/// Styles and artists already shown, accumulated from history entries whose
/// ids resolve in the current pool. Unresolvable ids are ignored; the pool
/// may have been refreshed between rounds.
#[must_use]
pub fn seen_attributes<'a>(
    history: &[PairChoice],
    by_id: &AHashMap<&str, &'a ArtworkCandidate>,
) -> (AHashSet<Style>, AHashSet<&'a str>) {
    let mut seen_styles = AHashSet::new();
    let mut seen_artists = AHashSet::new();
    for choice in history {
        for id in [choice.winner_id.as_str(), choice.loser_id.as_str()] {
            if let Some(candidate) = by_id.get(id) {
                seen_styles.extend(candidate.styles.iter().copied());
                seen_artists.insert(candidate.artist_id.as_str());
            }
        }
    }
    (seen_styles, seen_artists)
}

/// Artist of the most recent winner, when it resolves in the current pool.
#[must_use]
pub fn last_winner_artist<'a>(
    history: &[PairChoice],
    by_id: &AHashMap<&str, &'a ArtworkCandidate>,
) -> Option<&'a str> {
    let last = history.last()?;
    by_id
        .get(last.winner_id.as_str())
        .map(|candidate| candidate.artist_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_counts_include_skips() {
        let history = vec![
            PairChoice::new("a", "b", 1),
            PairChoice::new("a", "c", 2).skipped(),
        ];
        let counts = exposure_counts(&history);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("c"), Some(&1));
    }

    #[test]
    fn test_skip_count() {
        let history = vec![
            PairChoice::new("a", "b", 1),
            PairChoice::new("c", "d", 2).skipped(),
            PairChoice::new("a", "d", 3),
        ];
        assert_eq!(skip_count(&history), 1);
    }

    #[test]
    fn test_seen_attributes_ignore_unresolvable_ids() {
        let pool: Vec<ArtworkCandidate> = (0..2)
            .map(|i| ArtworkCandidate::synthetic(format!("art_{i}"), i))
            .collect();
        let by_id: AHashMap<&str, &ArtworkCandidate> =
            pool.iter().map(|c| (c.id.as_str(), c)).collect();

        let history = vec![PairChoice::new("art_0", "gone", 1)];
        let (styles, artists) = seen_attributes(&history, &by_id);
        assert_eq!(styles.len(), 1);
        assert!(artists.contains("artist_0"));
        assert_eq!(artists.len(), 1);
    }

    #[test]
    fn test_last_winner_artist() {
        let pool: Vec<ArtworkCandidate> = (0..2)
            .map(|i| ArtworkCandidate::synthetic(format!("art_{i}"), i))
            .collect();
        let by_id: AHashMap<&str, &ArtworkCandidate> =
            pool.iter().map(|c| (c.id.as_str(), c)).collect();

        assert_eq!(last_winner_artist(&[], &by_id), None);
        let history = vec![PairChoice::new("art_1", "art_0", 1)];
        assert_eq!(last_winner_artist(&history, &by_id), Some("artist_1"));
    }
}
