//! Declared preference vectors
//!
//! Turns a user's discrete category selections into fixed-dimension,
//! L2-normalized vectors over the taxonomy order. Membership, not selection
//! order, determines the encoding.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Color, Facet, Medium, Style};
use crate::vector::Vector;

/// Encode a label selection as an L2-normalized vector over the taxonomy.
///
/// Selected positions are 1 before normalization. Selecting nothing yields
/// the zero vector ("no signal"). Duplicate selections collapse, so the
/// result depends only on set membership.
#[must_use]
pub fn encode_selection<F: Facet>(selected: &[F]) -> Vector {
    let mut values = vec![0.0f32; F::DIM];
    for item in selected {
        values[item.index()] = 1.0;
    }
    Vector::new(values).normalized()
}

/// The three declared preference vectors, one per taxonomy.
///
/// Each vector's dimension matches its taxonomy size. An all-zero vector is
/// valid and means the user declared nothing for that facet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceVectors {
    pub colors: Vector,
    pub mediums: Vector,
    pub styles: Vector,
}

impl PreferenceVectors {
    /// All-zero vectors at the taxonomy dimensions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: Vector::zeros(Color::DIM),
            mediums: Vector::zeros(Medium::DIM),
            styles: Vector::zeros(Style::DIM),
        }
    }

    #[must_use]
    pub fn from_selections(colors: &[Color], mediums: &[Medium], styles: &[Style]) -> Self {
        Self {
            colors: encode_selection(colors),
            mediums: encode_selection(mediums),
            styles: encode_selection(styles),
        }
    }
}

impl Default for PreferenceVectors {
    fn default() -> Self {
        Self::empty()
    }
}

/// The raw category selections a user declared during onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeclaredSelections {
    pub colors: Vec<Color>,
    pub mediums: Vec<Medium>,
    pub styles: Vec<Style>,
}
