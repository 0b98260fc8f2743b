//! Candidate artwork model

use serde::{Deserialize, Serialize};

use crate::preference::encode_selection;
use crate::taxonomy::{Color, Facet, Medium, Style};
use crate::vector::Vector;

/// A candidate artwork with its embedding and categorical sub-vectors.
///
/// Immutable once constructed for a session. The sub-vectors are
/// one-hot-or-union encoded over the taxonomy order and L2-normalized; the
/// denormalized label sets are kept alongside for diversity checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkCandidate {
    pub id: String,
    /// Combined low-dimensional content embedding.
    pub embedding: Vector,
    pub color_vector: Vector,
    pub medium_vector: Vector,
    pub style_vector: Vector,
    pub colors: Vec<Color>,
    pub mediums: Vec<Medium>,
    pub styles: Vec<Style>,
    pub artist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ArtworkCandidate {
    /// Build a candidate from its categorical labels.
    ///
    /// The combined embedding is derived from the style and medium
    /// sub-vectors; the color vector is encoded but does not contribute to
    /// the embedding (palette data is sparse at the source).
    #[must_use]
    pub fn from_facets(
        id: impl Into<String>,
        artist_id: impl Into<String>,
        colors: Vec<Color>,
        mediums: Vec<Medium>,
        styles: Vec<Style>,
    ) -> Self {
        let color_vector = encode_selection(&colors);
        let medium_vector = encode_selection(&mediums);
        let style_vector = encode_selection(&styles);
        let embedding = combined_embedding(&style_vector, &medium_vector);

        Self {
            id: id.into(),
            embedding,
            color_vector,
            medium_vector,
            style_vector,
            colors,
            mediums,
            styles,
            artist_id: artist_id.into(),
            title: None,
            artist_title: None,
            image_url: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_artist_title(mut self, artist_title: impl Into<String>) -> Self {
        self.artist_title = Some(artist_title.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Deterministic placeholder candidate, used when no external source is
    /// reachable. Attributes cycle through the taxonomies by index so a
    /// synthetic pool still exercises diversity and scoring.
    #[must_use]
    pub fn synthetic(id: impl Into<String>, index: usize) -> Self {
        let color = Color::all()[index % Color::DIM];
        let medium = Medium::all()[index % Medium::DIM];
        let style = Style::all()[index % Style::DIM];

        let mut embedding = vec![0.0f32; 4];
        embedding[0] = (index + 1) as f32;

        Self {
            id: id.into(),
            embedding: Vector::new(embedding),
            color_vector: one_hot(Color::DIM, color.index()),
            medium_vector: one_hot(Medium::DIM, medium.index()),
            style_vector: one_hot(Style::DIM, style.index()),
            colors: vec![color],
            mediums: vec![medium],
            styles: vec![style],
            artist_id: format!("artist_{}", index % 8),
            title: Some(format!("Synthetic Artwork {}", index + 1)),
            artist_title: Some(format!("Synthetic Artist {}", index % 8)),
            image_url: None,
        }
    }

    /// Build the deterministic synthetic pool for a list of ids.
    #[must_use]
    pub fn synthetic_pool(ids: &[String]) -> Vec<Self> {
        ids.iter()
            .enumerate()
            .map(|(index, id)| Self::synthetic(id.clone(), index))
            .collect()
    }
}

/// Derive a combined embedding from the style and medium sub-vectors.
///
/// Concatenates and re-normalizes; a single-zero vector stands in when both
/// sub-vectors are empty so downstream cosine math stays defined.
#[must_use]
pub fn combined_embedding(style_vector: &Vector, medium_vector: &Vector) -> Vector {
    if style_vector.is_empty() && medium_vector.is_empty() {
        return Vector::new(vec![0.0]);
    }
    let mut data = Vec::with_capacity(style_vector.dim() + medium_vector.dim());
    data.extend_from_slice(style_vector.as_slice());
    data.extend_from_slice(medium_vector.as_slice());
    Vector::new(data).normalized()
}

fn one_hot(dim: usize, index: usize) -> Vector {
    let mut values = vec![0.0f32; dim];
    values[index] = 1.0;
    Vector::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_facets_normalizes_sub_vectors() {
        let candidate = ArtworkCandidate::from_facets(
            "a1",
            "artist_1",
            vec![Color::Blue],
            vec![Medium::Painting, Medium::Photography],
            vec![Style::Cubist],
        );
        assert!((candidate.style_vector.magnitude() - 1.0).abs() < 1e-6);
        assert!((candidate.medium_vector.magnitude() - 1.0).abs() < 1e-6);
        assert!((candidate.embedding.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(candidate.embedding.dim(), Style::DIM + Medium::DIM);
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let a = ArtworkCandidate::synthetic("art_001", 0);
        let b = ArtworkCandidate::synthetic("art_001", 0);
        assert_eq!(a, b);
        assert_eq!(a.embedding.as_slice(), &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(a.artist_id, "artist_0");
    }

    #[test]
    fn test_synthetic_pool_cycles_attributes() {
        let ids: Vec<String> = (0..12).map(|i| format!("art_{:03}", i + 1)).collect();
        let pool = ArtworkCandidate::synthetic_pool(&ids);
        assert_eq!(pool.len(), 12);
        assert_eq!(pool[0].styles, vec![Style::Modern]);
        assert_eq!(pool[10].styles, vec![Style::Modern]);
        assert_eq!(pool[3].mediums, vec![Medium::WoodCarving]);
    }
}
