//! Nearest-neighbor tables.
//!
//! The spectral pipeline only needs, for every point, the indices of its `m`
//! nearest neighbors. Where those come from is a seam: [`NeighborSearch`]
//! is implemented here by an exact [`BruteForceSearch`], and callers with an
//! approximate index (HNSW, IVF, ...) can plug that in instead.
//!
//! Whatever produces the table, [`NeighborTable::new`] checks its shape and
//! index range, so a misbehaving search surfaces as
//! [`SpectralError::ContractViolation`] rather than an out-of-bounds panic.

use crate::distance::DistanceMetric;
use crate::error::{Result, SpectralError};

/// An `n x m` table of neighbor indices, stored row-major.
///
/// Row `i` lists the `m` nearest neighbors of point `i`. Every entry is in `[0, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    indices: Vec<u32>,
    num_points: usize,
    m: usize,
}

impl NeighborTable {
    /// Wrap a row-major index buffer, validating shape and range.
    pub fn new(indices: Vec<u32>, num_points: usize, m: usize) -> Result<Self> {
        if indices.len() != num_points * m {
            return Err(SpectralError::ContractViolation(format!(
                "neighbor table has {} entries, expected {num_points} x {m}",
                indices.len()
            )));
        }
        if let Some(pos) = indices.iter().position(|&j| j as usize >= num_points) {
            return Err(SpectralError::ContractViolation(format!(
                "neighbor index {} in row {} is out of range for {num_points} points",
                indices[pos],
                pos / m.max(1)
            )));
        }
        Ok(Self {
            indices,
            num_points,
            m,
        })
    }

    /// Build a table from one neighbor list per point.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self> {
        let m = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != m) {
            return Err(SpectralError::ContractViolation(format!(
                "row {bad} has {} neighbors, expected {m}",
                rows[bad].len()
            )));
        }
        let indices = rows.iter().flatten().copied().collect();
        Self::new(indices, rows.len(), m)
    }

    /// Neighbors of point `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.indices[i * self.m..(i + 1) * self.m]
    }

    /// Iterate rows in point order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        (0..self.num_points).map(move |i| self.row(i))
    }

    /// Number of points (rows).
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Neighbors per point (columns).
    pub fn m(&self) -> usize {
        self.m
    }

    /// True if `j` is listed among the neighbors of `i`.
    pub fn contains(&self, i: usize, j: u32) -> bool {
        self.row(i).contains(&j)
    }
}

/// Produces a neighbor table for a point set.
pub trait NeighborSearch {
    /// Return the `m` nearest neighbors of every point, nearest first.
    ///
    /// # Errors
    ///
    /// [`SpectralError::InvalidParameter`] if `m == 0` or `m >= points.len()`.
    fn neighbor_table(&self, points: &[Vec<f32>], m: usize) -> Result<NeighborTable>;
}

/// Exact nearest-neighbor search by full pairwise distance scan.
///
/// O(n² · d) time, O(n) scratch per row. A point is never its own neighbor;
/// equal distances are ordered by lower index.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearch {
    metric: DistanceMetric,
}

impl BruteForceSearch {
    /// Brute-force search with the given metric.
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    /// The metric used to rank neighbors.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

impl NeighborSearch for BruteForceSearch {
    fn neighbor_table(&self, points: &[Vec<f32>], m: usize) -> Result<NeighborTable> {
        let n = points.len();
        check_points(points)?;
        if m == 0 {
            return Err(SpectralError::InvalidParameter(
                "number of neighbors must be >= 1".into(),
            ));
        }
        if m >= n {
            return Err(SpectralError::InvalidParameter(format!(
                "number of neighbors ({m}) must be < number of points ({n})"
            )));
        }

        let mut indices = Vec::with_capacity(n * m);
        let mut candidates: Vec<(f32, u32)> = Vec::with_capacity(n - 1);

        for (i, query) in points.iter().enumerate() {
            candidates.clear();
            candidates.extend(
                points
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(j, p)| (self.metric.distance(query, p), j as u32)),
            );

            // Only the first m need ordering.
            let by_dist = |a: &(f32, u32), b: &(f32, u32)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));
            if m < candidates.len() {
                candidates.select_nth_unstable_by(m, by_dist);
                candidates.truncate(m);
            }
            candidates.sort_unstable_by(by_dist);

            indices.extend(candidates.iter().map(|&(_, j)| j));
        }

        NeighborTable::new(indices, n, m)
    }
}

/// Validate a point set and return its dimension.
///
/// Rejects empty input, zero-dimensional points, ragged rows, and non-finite coordinates.
pub(crate) fn check_points(points: &[Vec<f32>]) -> Result<usize> {
    let dimension = match points.first() {
        Some(p) if !p.is_empty() => p.len(),
        _ => return Err(SpectralError::EmptyInput),
    };
    for (i, p) in points.iter().enumerate() {
        if p.len() != dimension {
            return Err(SpectralError::DimensionMismatch {
                expected: dimension,
                found: p.len(),
            });
        }
        if p.iter().any(|x| !x.is_finite()) {
            return Err(SpectralError::InvalidParameter(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
    }
    Ok(dimension)
}
