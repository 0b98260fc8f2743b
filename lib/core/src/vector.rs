use serde::{Deserialize, Serialize};

/// A dense vector of floating point numbers
///
/// Operations that combine two vectors of different lengths work over the
/// shorter common prefix. Some candidates carry shorter placeholder
/// embeddings, so a length mismatch is a tolerated degrade, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Component at `index`, or 0.0 when the vector is shorter.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> f32 {
        self.data.get(index).copied().unwrap_or(0.0)
    }

    /// Dot product over the shorter common prefix.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean magnitude over the full vector.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Cosine similarity with another vector.
    ///
    /// Returns 0.0 when either vector has zero magnitude. This is a defined
    /// result, not an error: an all-zero vector means "no signal".
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        let mag_a = self.magnitude();
        let mag_b = other.magnitude();
        if mag_a == 0.0 || mag_b == 0.0 {
            return 0.0;
        }
        self.dot(other) / (mag_a * mag_b)
    }

    /// Normalize the vector to unit length in place.
    ///
    /// A zero vector is left unchanged, which makes normalization idempotent.
    #[inline]
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag > 0.0 {
            for x in &mut self.data {
                *x /= mag;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Indices of strictly positive components, treating the vector as a
    /// set-membership indicator.
    #[must_use]
    pub fn support(&self) -> ahash::AHashSet<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0.0)
            .map(|(index, _)| index)
            .collect()
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}
