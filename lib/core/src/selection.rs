//! Active pair selection
//!
//! Picks the next two candidates to compare. The anchor is drawn from the
//! least-exposed candidates so every artwork is eventually shown; the
//! challenger is drawn from the most uncertain remainder so each comparison
//! stays informative; a best-effort diversity guard avoids artist repeats
//! and style tunnel-vision early in the session.
//!
//! Selection is pure given its inputs plus the caller's random source, which
//! keeps it unit-testable with a seeded generator and reproducible under
//! test while production wiring uses real entropy.

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkCandidate;
use crate::taxonomy::Style;

/// How the presented pair was chosen, so callers can tell degraded operation
/// from the normal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairRationale {
    /// Anchor by under-exposure, challenger by uncertainty.
    ActiveUncertainty,
    /// Degraded: first two candidates in pool order.
    FallbackPair,
}

/// The two roles in a presented pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPair {
    pub anchor_id: String,
    pub challenger_id: String,
    pub rationale: PairRationale,
}

/// Everything pair selection needs, resolved by the caller from session
/// state. Holding only borrows keeps the selector free of hidden state.
pub struct SelectionContext<'a> {
    pub pool: &'a [ArtworkCandidate],
    /// Per-candidate appearance counts over the whole history.
    pub exposure: &'a AHashMap<String, u32>,
    /// Per-candidate informativeness; the reference policy is
    /// `1 / (1 + exposure)`.
    pub uncertainty: &'a AHashMap<String, f32>,
    /// Artist of the most recent winner, for the repetition guard.
    pub last_artist_id: Option<&'a str>,
    /// Styles seen so far. Until `required_unique_styles` distinct styles
    /// have appeared, challengers must widen this set.
    pub seen_styles: &'a AHashSet<Style>,
    pub required_unique_styles: usize,
}

/// The reference uncertainty policy: less-seen candidates score higher.
#[must_use]
pub fn uncertainty_scores(
    pool: &[ArtworkCandidate],
    exposure: &AHashMap<String, u32>,
) -> AHashMap<String, f32> {
    pool.iter()
        .map(|candidate| {
            let seen = exposure.get(&candidate.id).copied().unwrap_or(0);
            (candidate.id.clone(), 1.0 / (1.0 + seen as f32))
        })
        .collect()
}

/// Select the next comparison pair, or `None` when the pool cannot form one.
///
/// The diversity guard is best-effort: when no candidate passes it, the
/// original challenger is kept rather than failing the round.
pub fn select_next_pair<R: Rng + ?Sized>(
    ctx: &SelectionContext<'_>,
    rng: &mut R,
) -> Option<SelectedPair> {
    if ctx.pool.len() < 2 {
        return None;
    }

    let anchor = pick_least_exposed(ctx, rng)?;

    let Some(mut challenger) = pick_most_uncertain(ctx, &anchor.id, rng) else {
        let (a, b) = (ctx.pool.first()?, ctx.pool.get(1)?);
        return Some(SelectedPair {
            anchor_id: a.id.clone(),
            challenger_id: b.id.clone(),
            rationale: PairRationale::FallbackPair,
        });
    };

    if violates_diversity_guard(challenger, ctx) {
        challenger = ctx
            .pool
            .iter()
            .find(|candidate| {
                candidate.id != anchor.id && !violates_diversity_guard(candidate, ctx)
            })
            .unwrap_or(challenger);
    }

    Some(SelectedPair {
        anchor_id: anchor.id.clone(),
        challenger_id: challenger.id.clone(),
        rationale: PairRationale::ActiveUncertainty,
    })
}

/// Anchor: uniform pick among candidates tied at the minimum exposure.
/// Guarantees every candidate is eventually shown and prevents popularity
/// lock-in.
fn pick_least_exposed<'a, R: Rng + ?Sized>(
    ctx: &SelectionContext<'a>,
    rng: &mut R,
) -> Option<&'a ArtworkCandidate> {
    let exposures: Vec<(&ArtworkCandidate, u32)> = ctx
        .pool
        .iter()
        .map(|candidate| {
            (
                candidate,
                ctx.exposure.get(&candidate.id).copied().unwrap_or(0),
            )
        })
        .collect();

    let min = exposures.iter().map(|(_, seen)| *seen).min()?;
    let least: Vec<&ArtworkCandidate> = exposures
        .iter()
        .filter(|(_, seen)| *seen == min)
        .map(|(candidate, _)| *candidate)
        .collect();

    least.choose(rng).copied()
}

/// Challenger: uniform pick among non-anchor candidates tied at the maximum
/// uncertainty score.
fn pick_most_uncertain<'a, R: Rng + ?Sized>(
    ctx: &SelectionContext<'a>,
    anchor_id: &str,
    rng: &mut R,
) -> Option<&'a ArtworkCandidate> {
    let scored: Vec<(&ArtworkCandidate, f32)> = ctx
        .pool
        .iter()
        .filter(|candidate| candidate.id != anchor_id)
        .map(|candidate| {
            (
                candidate,
                ctx.uncertainty.get(&candidate.id).copied().unwrap_or(0.0),
            )
        })
        .collect();

    let max = scored
        .iter()
        .map(|(_, score)| OrderedFloat(*score))
        .max()?;
    let top: Vec<&ArtworkCandidate> = scored
        .iter()
        .filter(|(_, score)| OrderedFloat(*score) == max)
        .map(|(candidate, _)| *candidate)
        .collect();

    top.choose(rng).copied()
}

/// A challenger is rejected when it repeats the last winner's artist, or
/// when the session has not yet seen the required number of distinct styles
/// and the candidate would not widen the seen set.
fn violates_diversity_guard(candidate: &ArtworkCandidate, ctx: &SelectionContext<'_>) -> bool {
    if let Some(last_artist) = ctx.last_artist_id {
        if candidate.artist_id == last_artist {
            return true;
        }
    }
    if ctx.seen_styles.len() < ctx.required_unique_styles {
        return !candidate
            .styles
            .iter()
            .any(|style| !ctx.seen_styles.contains(style));
    }
    false
}
