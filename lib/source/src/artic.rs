//! Art Institute of Chicago candidate source
//!
//! Queries the public search API once per requested style, maps catalog
//! records onto the taste taxonomies, and returns a shuffled pool. Only
//! public-domain records with an image survive the mapping. Per-style
//! failures are tolerated with a warning; the engine treats a thin pool the
//! same way it treats any other short fetch.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::warn;

use curata_core::{ArtworkCandidate, Error, Facet, Medium, Result, Style};

use crate::CandidateSource;

const ARTIC_SEARCH_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks/search";
const ARTIC_FIELDS: &str =
    "id,title,artist_title,style_titles,classification_titles,image_id,is_public_domain";
const USER_AGENT: &str = "curata taste onboarding";

/// Styles queried when the user has not narrowed the filter yet.
const DEFAULT_STYLES: [Style; 3] = [Style::Modern, Style::Impressionist, Style::Abstract];

const MIN_PER_STYLE: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ArticRecord>,
}

#[derive(Debug, Deserialize)]
struct ArticRecord {
    id: u64,
    title: Option<String>,
    artist_title: Option<String>,
    style_titles: Option<Vec<String>>,
    classification_titles: Option<Vec<String>>,
    image_id: Option<String>,
    #[serde(default)]
    is_public_domain: bool,
}

pub struct ArticSource {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for ArticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: ARTIC_SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Point the source at a different endpoint, for tests against a local
    /// stub server.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn query(&self, style: Style, limit: usize) -> Result<Vec<ArticRecord>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("q", style_query(style)),
                ("fields", ARTIC_FIELDS),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "artic api returned status {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Source(e.to_string()))?;
        Ok(body.data)
    }
}

#[async_trait]
impl CandidateSource for ArticSource {
    async fn fetch(&self, styles: &[Style], desired: usize) -> Result<Vec<ArtworkCandidate>> {
        let queried: Vec<Style> = if styles.is_empty() {
            DEFAULT_STYLES.to_vec()
        } else {
            styles.to_vec()
        };
        let per_style = MIN_PER_STYLE.max(desired.div_ceil(queried.len()));

        let mut aggregated: Vec<ArtworkCandidate> = Vec::new();
        for style in &queried {
            match self.query(*style, per_style).await {
                Ok(records) => {
                    for record in records {
                        let Some(candidate) = candidate_from_record(record, styles) else {
                            continue;
                        };
                        if !aggregated.iter().any(|existing| existing.id == candidate.id) {
                            aggregated.push(candidate);
                        }
                    }
                }
                Err(err) => {
                    warn!(style = style.label(), %err, "artic style query failed");
                }
            }
        }

        aggregated.shuffle(&mut rand::rng());
        aggregated.truncate(desired);
        Ok(aggregated)
    }
}

/// Search term for a style; a couple of labels need rephrasing to match
/// catalog vocabulary.
fn style_query(style: Style) -> &'static str {
    match style {
        Style::AfricanIndigenous => "African OR Indigenous patterns",
        other => other.label(),
    }
}

fn candidate_from_record(record: ArticRecord, requested: &[Style]) -> Option<ArtworkCandidate> {
    let image_id = record.image_id.as_deref()?;
    if !record.is_public_domain {
        return None;
    }

    let mut styles = styles_from_titles(record.style_titles.as_deref().unwrap_or_default());
    if styles.is_empty() && !requested.is_empty() {
        styles = requested.to_vec();
    }
    let mediums = mediums_from_classifications(
        record.classification_titles.as_deref().unwrap_or_default(),
    );

    let artist_id = record
        .artist_title
        .clone()
        .unwrap_or_else(|| format!("artist_{}", record.id));
    let image_url = format!(
        "https://www.artic.edu/iiif/2/{image_id}/full/843,/0/default.jpg"
    );

    let mut candidate = ArtworkCandidate::from_facets(
        record.id.to_string(),
        artist_id,
        Vec::new(),
        mediums,
        styles,
    )
    .with_image_url(image_url);
    candidate.title = record.title;
    candidate.artist_title = record.artist_title;
    Some(candidate)
}

/// Match catalog style titles onto the taxonomy by substring in either
/// direction, case-insensitively.
fn styles_from_titles(titles: &[String]) -> Vec<Style> {
    let normalized: Vec<String> = titles.iter().map(|t| t.trim().to_lowercase()).collect();
    Style::all()
        .iter()
        .copied()
        .filter(|style| {
            let label = style.label().to_lowercase();
            normalized
                .iter()
                .any(|title| title.contains(&label) || label.contains(title.as_str()))
        })
        .collect()
}

fn mediums_from_classifications(classifications: &[String]) -> Vec<Medium> {
    let normalized: Vec<String> = classifications.iter().map(|c| c.to_lowercase()).collect();
    Medium::all()
        .iter()
        .copied()
        .filter(|medium| {
            medium_keywords(*medium)
                .iter()
                .any(|keyword| normalized.iter().any(|value| value.contains(keyword)))
        })
        .collect()
}

fn medium_keywords(medium: Medium) -> &'static [&'static str] {
    match medium {
        Medium::Painting => &["painting", "paintings"],
        Medium::Sculpture => &["sculpture", "sculptures"],
        Medium::StreetArt => &["street"],
        Medium::WoodCarving => &["wood", "carving"],
        Medium::Photography => &["photo", "photograph", "photography"],
    }
}
