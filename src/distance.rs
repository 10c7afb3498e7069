//! Distance metrics for dense points.
//!
//! Neighbor search and k-means both compare points by these functions. The
//! neighbor table only depends on the *ordering* of distances, so
//! [`DistanceMetric::SquaredL2`] and [`DistanceMetric::L2`] yield identical
//! tables; the squared form skips the `sqrt`.

use serde::{Deserialize, Serialize};

/// Distance metric used to rank neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    SquaredL2,
    /// Euclidean (L2) distance.
    L2,
    /// Cosine distance $1 - \cos(a,b)$.
    Cosine,
}

impl DistanceMetric {
    /// Compute distance between two points.
    ///
    /// If dimensions mismatch, this returns `f32::INFINITY` (so it is never selected as a
    /// nearest neighbor).
    #[inline]
    #[must_use]
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::SquaredL2 => l2_distance_squared(a, b),
            DistanceMetric::L2 => l2_distance(a, b),
            DistanceMetric::Cosine => cosine_distance(a, b),
        }
    }
}

/// L2 distance squared (faster when only comparing distances).
#[inline]
#[must_use]
pub fn l2_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// L2 (Euclidean) distance.
#[inline]
#[must_use]
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    l2_distance_squared(a, b).sqrt()
}

/// Cosine distance $1 - \cos(a,b)$.
///
/// Zero vectors have no direction; their distance to anything is 1.
#[inline]
#[must_use]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na < 1e-9 || nb < 1e-9 {
        return 1.0;
    }
    1.0 - (dot / (na * nb)).clamp(-1.0, 1.0)
}
