//! Wire request/response shapes
//!
//! Field names are camelCase on the wire; these structs are the engine
//! contract as well as the REST bodies.

use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};
use curata_core::{
    Color, Medium, PairChoice, PreferenceVectors, Style, TasteSummary, Vector,
};
use curata_session::SessionTelemetry;

/// Optional per-facet overrides supplied at start. Missing facets stay at
/// the zero "no signal" vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartialPreferenceVectors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediums: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vector>,
}

impl PartialPreferenceVectors {
    /// Merge over empty defaults.
    #[must_use]
    pub fn merged(self) -> PreferenceVectors {
        let base = PreferenceVectors::empty();
        PreferenceVectors {
            colors: self.colors.unwrap_or(base.colors),
            mediums: self.mediums.unwrap_or(base.mediums),
            styles: self.styles.unwrap_or(base.styles),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub preference_vectors: Option<PartialPreferenceVectors>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub session_id: String,
    pub candidate_ids: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub history: Vec<PairChoice>,
    #[serde(default)]
    pub styles: Vec<Style>,
}

/// Display projection of one candidate in a presented pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairArtwork {
    pub id: String,
    pub title: Option<String>,
    pub artist_title: Option<String>,
    pub image_url: Option<String>,
    pub styles: Vec<Style>,
}

impl From<&curata_core::ArtworkCandidate> for PairArtwork {
    fn from(candidate: &curata_core::ArtworkCandidate) -> Self {
        Self {
            id: candidate.id.clone(),
            title: candidate.title.clone(),
            artist_title: candidate.artist_title.clone(),
            image_url: candidate.image_url.clone(),
            styles: candidate.styles.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedPair {
    pub artwork_a: PairArtwork,
    pub artwork_b: PairArtwork,
    pub allow_skip: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextResponse {
    pub session_id: String,
    pub round: u32,
    pub total_rounds: u32,
    pub pair: PresentedPair,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub mediums: Vec<Medium>,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub pairs: Vec<PairChoice>,
    pub telemetry: SessionTelemetry,
}

/// Top-level blend actually used for the final ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlendWeights {
    pub w_embed: f32,
    pub w_attr: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishResponse {
    pub session_id: String,
    pub summary: TasteSummary,
    pub user_vector: Vector,
    pub weights: BlendWeights,
}
