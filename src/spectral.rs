//! Graph Laplacian and spectral embedding.
//!
//! For a connected graph `G` with degree matrix `D`, the unnormalized Laplacian
//! `L = D - G` is symmetric positive-semidefinite with exactly one zero
//! eigenvalue, whose eigenvector is constant. The spectral embedding of `G`
//! into `k` dimensions is made of the eigenvectors of the `k` next-smallest
//! eigenvalues.
//!
//! # Eigen band
//!
//! Rank indices are 0-based over the ascending spectrum. The embedding uses
//! the band `[1, k + 1)`: skip exactly the trivial eigenvector (rank 0), then
//! take `k` columns. This needs `k + 1 <= n`.
//!
//! With `c` well-separated clusters only the first `c - 1` columns carry the
//! cluster structure. The rest come from within-cluster modes, which can be
//! as large as the cluster signal when clusters are tiny. Two triangles
//! joined by one edge with `k = 2` end up split along a triangle mode, not
//! between the triangles.
//!
//! # Solver
//!
//! Decomposition goes through [`EigenSolver`]. [`DenseEigenSolver`] wraps
//! `nalgebra::SymmetricEigen`, which computes the full spectrum; the band is
//! cut afterwards.

use std::ops::Range;

use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::{Result, SpectralError};
use crate::graph::{is_connected, AdjacencyMatrix};

/// Symmetric eigendecomposition restricted to an ascending rank band.
pub trait EigenSolver {
    /// Eigenpairs with ascending ranks in `band`.
    ///
    /// Returns the eigenvalues in ascending order and an `n x band.len()` matrix
    /// whose column `c` is the eigenvector of eigenvalue `c`.
    ///
    /// # Errors
    ///
    /// [`SpectralError::NumericalError`] if `matrix` is not square and symmetric,
    /// if `band` is empty or reaches past `n`, or if the solver does not converge.
    fn eigh_band(&self, matrix: &DMatrix<f64>, band: Range<usize>) -> Result<(Vec<f64>, DMatrix<f64>)>;
}

/// Dense symmetric eigensolver backed by `nalgebra::SymmetricEigen`.
#[derive(Debug, Clone, Copy)]
pub struct DenseEigenSolver {
    /// Absolute tolerance for the symmetry check.
    pub symmetry_tol: f64,
}

impl Default for DenseEigenSolver {
    fn default() -> Self {
        Self { symmetry_tol: 1e-9 }
    }
}

impl EigenSolver for DenseEigenSolver {
    fn eigh_band(&self, matrix: &DMatrix<f64>, band: Range<usize>) -> Result<(Vec<f64>, DMatrix<f64>)> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(SpectralError::NumericalError(format!(
                "matrix is {}x{}, expected square",
                n,
                matrix.ncols()
            )));
        }
        if band.is_empty() || band.end > n {
            return Err(SpectralError::NumericalError(format!(
                "eigen band {}..{} is invalid for a {n}x{n} matrix",
                band.start, band.end
            )));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (matrix[(i, j)] - matrix[(j, i)]).abs() > self.symmetry_tol {
                    return Err(SpectralError::NumericalError(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }

        // max_niter = 0 means iterate until convergence.
        let eigen = SymmetricEigen::try_new(matrix.clone(), f64::EPSILON, 0).ok_or_else(|| {
            SpectralError::NumericalError("symmetric eigendecomposition did not converge".into())
        })?;

        // nalgebra leaves the spectrum unordered. Stable sort keeps the
        // solver's own order among ties.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let picked = &order[band];
        let values = picked.iter().map(|&idx| eigen.eigenvalues[idx]).collect();
        let vectors = DMatrix::from_fn(n, picked.len(), |row, col| eigen.eigenvectors[(row, picked[col])]);

        Ok((values, vectors))
    }
}

/// Unnormalized graph Laplacian `L = D - G`.
///
/// Self-loops add to both `D[i,i]` and `G[i,i]`, so they cancel.
pub fn laplacian(graph: &AdjacencyMatrix) -> DMatrix<f64> {
    let n = graph.num_vertices();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            graph.degree(i) as f64 - if graph.get(i, i) { 1.0 } else { 0.0 }
        } else if graph.get(i, j) {
            -1.0
        } else {
            0.0
        }
    })
}

/// Spectral coordinates of every vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// Row-major `num_points x dimension` coordinates.
    coords: Vec<f32>,
    num_points: usize,
    dimension: usize,
    /// Eigenvalues behind each column, ascending.
    eigenvalues: Vec<f64>,
}

impl Embedding {
    /// Coordinates of point `i`.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.coords[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Flat row-major coordinate buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.coords
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Number of columns (k).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Eigenvalue of each column, ascending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }
}

/// Embed a connected graph into `k` spectral dimensions.
///
/// Takes the eigenvectors of ranks `1..=k` of the Laplacian, i.e. everything
/// after the single trivial one.
///
/// # Errors
///
/// - [`SpectralError::InvalidParameter`] if `k == 0` or `k + 1 > n`.
/// - [`SpectralError::NumericalError`] if the graph is not connected, or from the solver.
pub fn spectral_embedding<S>(graph: &AdjacencyMatrix, k: usize, solver: &S) -> Result<Embedding>
where
    S: EigenSolver + ?Sized,
{
    let n = graph.num_vertices();
    if k == 0 {
        return Err(SpectralError::InvalidParameter(
            "embedding dimension k must be >= 1".into(),
        ));
    }
    if k + 1 > n {
        return Err(SpectralError::InvalidParameter(format!(
            "embedding dimension k={k} needs at least {} points, got {n}",
            k + 1
        )));
    }
    if !is_connected(graph) {
        return Err(SpectralError::NumericalError(
            "graph must be connected before spectral embedding".into(),
        ));
    }

    let l = laplacian(graph);
    let (eigenvalues, vectors) = solver.eigh_band(&l, 1..k + 1)?;

    if vectors.nrows() != n || vectors.ncols() != k || eigenvalues.len() != k {
        return Err(SpectralError::ContractViolation(format!(
            "eigensolver returned {} values and a {}x{} basis, expected {k} and {n}x{k}",
            eigenvalues.len(),
            vectors.nrows(),
            vectors.ncols()
        )));
    }

    let mut coords = Vec::with_capacity(n * k);
    for row in 0..n {
        for col in 0..k {
            coords.push(vectors[(row, col)] as f32);
        }
    }

    Ok(Embedding {
        coords,
        num_points: n,
        dimension: k,
        eigenvalues,
    })
}
