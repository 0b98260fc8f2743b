//! Fixed category taxonomies
//!
//! Each taxonomy is a fixed, ordered list of labels. The label order defines
//! the dimensions of the corresponding preference and candidate sub-vectors,
//! so it must never be reordered without migrating stored vectors.

use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// A category taxonomy whose variants map onto fixed vector dimensions.
pub trait Facet: Copy + Eq + Hash + 'static {
    /// Number of labels, and therefore the vector dimension.
    const DIM: usize;

    /// All labels in taxonomy order.
    fn all() -> &'static [Self];

    /// Human-readable label, as used on the wire.
    fn label(self) -> &'static str;

    /// Position of this label in taxonomy order.
    fn index(self) -> usize {
        Self::all()
            .iter()
            .position(|item| *item == self)
            .unwrap_or(0)
    }
}

/// Dominant palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Pink,
    Violet,
    White,
    Stone,
    Black,
}

const ALL_COLORS: [Color; 10] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Orange,
    Color::Red,
    Color::Pink,
    Color::Violet,
    Color::White,
    Color::Stone,
    Color::Black,
];

impl Facet for Color {
    const DIM: usize = 10;

    fn all() -> &'static [Self] {
        &ALL_COLORS
    }

    fn label(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Red => "Red",
            Color::Pink => "Pink",
            Color::Violet => "Violet",
            Color::White => "White",
            Color::Stone => "Stone",
            Color::Black => "Black",
        }
    }
}

/// Physical mediums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    Painting,
    Sculpture,
    #[serde(rename = "Street Art")]
    StreetArt,
    #[serde(rename = "Wood Carving")]
    WoodCarving,
    Photography,
}

const ALL_MEDIUMS: [Medium; 5] = [
    Medium::Painting,
    Medium::Sculpture,
    Medium::StreetArt,
    Medium::WoodCarving,
    Medium::Photography,
];

impl Facet for Medium {
    const DIM: usize = 5;

    fn all() -> &'static [Self] {
        &ALL_MEDIUMS
    }

    fn label(self) -> &'static str {
        match self {
            Medium::Painting => "Painting",
            Medium::Sculpture => "Sculpture",
            Medium::StreetArt => "Street Art",
            Medium::WoodCarving => "Wood Carving",
            Medium::Photography => "Photography",
        }
    }
}

/// Art movements and visual styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    Modern,
    Impressionist,
    Cubist,
    Renaissance,
    #[serde(rename = "Baroque/Dutch")]
    BaroqueDutch,
    Abstract,
    Minimalist,
    Pop,
    #[serde(rename = "Asian ink")]
    AsianInk,
    #[serde(rename = "African/Indigenous patterns")]
    AfricanIndigenous,
}

const ALL_STYLES: [Style; 10] = [
    Style::Modern,
    Style::Impressionist,
    Style::Cubist,
    Style::Renaissance,
    Style::BaroqueDutch,
    Style::Abstract,
    Style::Minimalist,
    Style::Pop,
    Style::AsianInk,
    Style::AfricanIndigenous,
];

impl Facet for Style {
    const DIM: usize = 10;

    fn all() -> &'static [Self] {
        &ALL_STYLES
    }

    fn label(self) -> &'static str {
        match self {
            Style::Modern => "Modern",
            Style::Impressionist => "Impressionist",
            Style::Cubist => "Cubist",
            Style::Renaissance => "Renaissance",
            Style::BaroqueDutch => "Baroque/Dutch",
            Style::Abstract => "Abstract",
            Style::Minimalist => "Minimalist",
            Style::Pop => "Pop",
            Style::AsianInk => "Asian ink",
            Style::AfricanIndigenous => "African/Indigenous patterns",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_match_label_counts() {
        assert_eq!(Color::all().len(), Color::DIM);
        assert_eq!(Medium::all().len(), Medium::DIM);
        assert_eq!(Style::all().len(), Style::DIM);
    }

    #[test]
    fn test_index_follows_taxonomy_order() {
        assert_eq!(Color::Blue.index(), 0);
        assert_eq!(Color::Black.index(), 9);
        assert_eq!(Medium::Photography.index(), 4);
        assert_eq!(Style::AfricanIndigenous.index(), 9);
    }

    #[test]
    fn test_serde_uses_wire_labels() {
        let json = serde_json::to_string(&Style::BaroqueDutch).unwrap();
        assert_eq!(json, "\"Baroque/Dutch\"");
        let back: Style = serde_json::from_str("\"Asian ink\"").unwrap();
        assert_eq!(back, Style::AsianInk);
        let medium: Medium = serde_json::from_str("\"Street Art\"").unwrap();
        assert_eq!(medium, Medium::StreetArt);
    }
}
