//! Session summary aggregation
//!
//! Derives the user-facing digest from the ranked pool and the raw declared
//! selections. The top lists are simple truncations of the user's own
//! declarations, not re-ranked.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

use crate::choice::PairChoice;
use crate::preference::DeclaredSelections;
use crate::scoring::ScoreResult;
use crate::taxonomy::{Color, Medium, Style};

pub const TOP_STYLE_COUNT: usize = 3;
pub const TOP_MEDIUM_COUNT: usize = 2;
pub const PALETTE_COUNT: usize = 3;
pub const RECOMMENDED_COUNT: usize = 12;

/// Threshold below which the summary suggests refining the test.
pub const REFINE_THRESHOLD: f32 = 0.3;

/// Superset of the truncated top selections with the full declared lists,
/// used to seed filter UI. Not a ranking signal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryFacets {
    pub styles: Vec<Style>,
    pub mediums: Vec<Medium>,
    pub colors: Vec<Color>,
}

/// The final digest of one onboarding session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TasteSummary {
    pub top_styles: Vec<Style>,
    pub top_mediums: Vec<Medium>,
    pub palette: Vec<Color>,
    pub recommended_artwork_ids: Vec<String>,
    pub facets: SummaryFacets,
    pub stability_score: f32,
    pub refine_suggested: bool,
}

/// Confidence signal over the tail of the history: 1.0 with fewer than two
/// choices, 0.6 when the last two were both answered, 0.2 otherwise.
#[must_use]
pub fn stability_score(history: &[PairChoice]) -> f32 {
    if history.len() < 2 {
        return 1.0;
    }
    let answered = history[history.len() - 2..]
        .iter()
        .all(|choice| !choice.skipped);
    if answered {
        0.6
    } else {
        0.2
    }
}

/// Aggregate the digest from ranked scores, declared selections, and the
/// choice history. `ranked` must already be in descending score order.
#[must_use]
pub fn build_summary(
    ranked: &[ScoreResult],
    selections: &DeclaredSelections,
    history: &[PairChoice],
) -> TasteSummary {
    let top_styles: Vec<Style> = selections.styles.iter().copied().take(TOP_STYLE_COUNT).collect();
    let top_mediums: Vec<Medium> =
        selections.mediums.iter().copied().take(TOP_MEDIUM_COUNT).collect();
    let palette: Vec<Color> = selections.colors.iter().copied().take(PALETTE_COUNT).collect();

    let recommended_artwork_ids: Vec<String> = ranked
        .iter()
        .take(RECOMMENDED_COUNT)
        .map(|result| result.artwork_id.clone())
        .collect();

    let facets = SummaryFacets {
        styles: union_in_order(&top_styles, &selections.styles),
        mediums: union_in_order(&top_mediums, &selections.mediums),
        colors: union_in_order(&palette, &selections.colors),
    };

    let stability = stability_score(history);

    TasteSummary {
        top_styles,
        top_mediums,
        palette,
        recommended_artwork_ids,
        facets,
        stability_score: stability,
        refine_suggested: stability < REFINE_THRESHOLD,
    }
}

/// Order-preserving union: items from `head` then `rest`, first occurrence
/// wins.
fn union_in_order<T: Copy + Eq + Hash>(head: &[T], rest: &[T]) -> Vec<T> {
    let mut seen = ahash::AHashSet::new();
    head.iter()
        .chain(rest.iter())
        .copied()
        .filter(|item| seen.insert(*item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(ids: &[&str]) -> Vec<ScoreResult> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| ScoreResult {
                artwork_id: (*id).to_string(),
                score: 1.0 - i as f32 * 0.01,
                prior_score: 0.0,
                similarity_score: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_stability_with_short_history() {
        assert_eq!(stability_score(&[]), 1.0);
        assert_eq!(stability_score(&[PairChoice::new("a", "b", 1)]), 1.0);
    }

    #[test]
    fn test_stability_last_two_answered() {
        let history = vec![
            PairChoice::new("a", "b", 1).skipped(),
            PairChoice::new("a", "c", 2),
            PairChoice::new("b", "c", 3),
        ];
        assert_eq!(stability_score(&history), 0.6);
    }

    #[test]
    fn test_stability_with_recent_skip() {
        let history = vec![
            PairChoice::new("a", "b", 1),
            PairChoice::new("a", "c", 2).skipped(),
        ];
        assert_eq!(stability_score(&history), 0.2);
    }

    #[test]
    fn test_top_lists_truncate_declared_order() {
        let selections = DeclaredSelections {
            colors: vec![Color::Red, Color::Blue, Color::Black, Color::White],
            mediums: vec![Medium::Painting, Medium::Sculpture, Medium::Photography],
            styles: vec![
                Style::Pop,
                Style::Cubist,
                Style::Modern,
                Style::Minimalist,
            ],
        };
        let summary = build_summary(&scored(&["x"]), &selections, &[]);
        assert_eq!(summary.top_styles, vec![Style::Pop, Style::Cubist, Style::Modern]);
        assert_eq!(summary.top_mediums, vec![Medium::Painting, Medium::Sculpture]);
        assert_eq!(summary.palette, vec![Color::Red, Color::Blue, Color::Black]);
        // Facets keep the full declared lists without duplicates.
        assert_eq!(summary.facets.styles.len(), 4);
        assert_eq!(summary.facets.colors.len(), 4);
        assert_eq!(summary.facets.mediums.len(), 3);
    }

    #[test]
    fn test_recommendations_cap_at_twelve() {
        let ids: Vec<String> = (0..20).map(|i| format!("art_{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let summary = build_summary(&scored(&id_refs), &DeclaredSelections::default(), &[]);
        assert_eq!(summary.recommended_artwork_ids.len(), RECOMMENDED_COUNT);
        assert_eq!(summary.recommended_artwork_ids[0], "art_0");
    }

    #[test]
    fn test_refine_flag_tracks_threshold() {
        let unstable = vec![
            PairChoice::new("a", "b", 1),
            PairChoice::new("a", "c", 2).skipped(),
        ];
        let summary = build_summary(&scored(&["x"]), &DeclaredSelections::default(), &unstable);
        assert_eq!(summary.stability_score, 0.2);
        assert!(summary.refine_suggested);

        let stable = vec![PairChoice::new("a", "b", 1), PairChoice::new("a", "c", 2)];
        let summary = build_summary(&scored(&["x"]), &DeclaredSelections::default(), &stable);
        assert_eq!(summary.stability_score, 0.6);
        assert!(!summary.refine_suggested);
    }
}
