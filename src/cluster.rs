//! End-to-end spectral clustering.
//!
//! ```text
//! points ──NeighborSearch──▶ NeighborTable ──▶ AdjacencyMatrix
//!        ──repair──▶ connected graph ──Laplacian──▶ Embedding ──k-means──▶ labels
//! ```
//!
//! k-means runs on the spectral embedding, never on the raw points; that is
//! what makes this spectral clustering.
//!
//! # Parameter clamping
//!
//! A point has at most `n - 1` neighbors. A larger `n_neighbors` is lowered to
//! `n - 1` with a warning (the graph is then complete). Every other invalid
//! parameter is an error: `k` is never silently reduced.
//!
//! # Example
//!
//! ```rust
//! use mnn_spectral::{SpectralClustering, SpectralParams};
//!
//! let points: Vec<Vec<f32>> = (0..12)
//!     .map(|i| {
//!         let offset = if i < 6 { 0.0 } else { 50.0 };
//!         vec![offset + (i % 6) as f32 * 0.1, offset]
//!     })
//!     .collect();
//!
//! let params = SpectralParams::new(2).with_n_neighbors(3);
//! let labels = SpectralClustering::new(params).fit_predict(&points).unwrap();
//! assert_eq!(labels.len(), 12);
//! assert_ne!(labels[0], labels[11]);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SpectralError};
use crate::graph::{repair_connectivity, AdjacencyMatrix, RepairConfig, RepairStats};
use crate::neighbors::{check_points, BruteForceSearch, NeighborSearch};
use crate::partitioning::{KMeans, KMeansParams};
use crate::spectral::{spectral_embedding, DenseEigenSolver, EigenSolver, Embedding};

/// Progress logging: `info` when verbose, `debug` otherwise.
macro_rules! stage {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Parameters for [`SpectralClustering`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralParams {
    /// Number of clusters (k); also the embedding dimension.
    pub n_clusters: usize,
    /// Neighbors per point (M) in the nearest-neighbor graph.
    pub n_neighbors: usize,
    /// Seed for connectivity repair. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// How disconnected components are linked.
    pub repair: RepairConfig,
    /// k-means on the embedding.
    pub kmeans: KMeansParams,
    /// Log pipeline stages at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for SpectralParams {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            n_neighbors: 10,
            seed: Some(42),
            repair: RepairConfig::default(),
            kmeans: KMeansParams::default(),
            verbose: false,
        }
    }
}

impl SpectralParams {
    /// Defaults with `n_clusters` clusters.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    /// Seed both the repair step and k-means.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.kmeans.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_repair(mut self, repair: RepairConfig) -> Self {
        self.repair = repair;
        self
    }

    #[must_use]
    pub fn with_kmeans(mut self, kmeans: KMeansParams) -> Self {
        self.kmeans = kmeans;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check everything that does not depend on the input size.
    pub fn validate(&self) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(SpectralError::InvalidParameter(
                "n_clusters must be >= 1".into(),
            ));
        }
        if self.n_neighbors == 0 {
            return Err(SpectralError::InvalidParameter(
                "n_neighbors must be >= 1".into(),
            ));
        }
        if self.kmeans.n_init == 0 || self.kmeans.max_iter == 0 {
            return Err(SpectralError::InvalidParameter(
                "k-means n_init and max_iter must be >= 1".into(),
            ));
        }
        if !(self.kmeans.tol.is_finite() && self.kmeans.tol >= 0.0) {
            return Err(SpectralError::InvalidParameter(format!(
                "k-means tolerance must be finite and non-negative, got {}",
                self.kmeans.tol
            )));
        }
        Ok(())
    }
}

/// Output of one clustering run.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    /// Cluster of each point, in `[0, n_clusters)`.
    pub labels: Vec<usize>,
    /// Spectral coordinates k-means was fit on.
    pub embedding: Embedding,
    /// Edges added to connect the graph.
    pub repair: RepairStats,
    /// Neighbors per point actually used, after clamping.
    pub n_neighbors: usize,
    /// k-means within-cluster sum of squares in embedding space.
    pub inertia: f32,
}

/// Spectral clustering over a mutual-nearest-neighbor graph.
///
/// Generic over the neighbor search and eigensolver so either can be swapped
/// for an approximate or accelerated implementation.
#[derive(Debug, Clone)]
pub struct SpectralClustering<N = BruteForceSearch, E = DenseEigenSolver> {
    params: SpectralParams,
    search: N,
    solver: E,
}

impl SpectralClustering {
    /// Exact neighbor search and dense eigensolver.
    pub fn new(params: SpectralParams) -> Self {
        Self {
            params,
            search: BruteForceSearch::default(),
            solver: DenseEigenSolver::default(),
        }
    }
}

impl<N, E> SpectralClustering<N, E>
where
    N: NeighborSearch,
    E: EigenSolver,
{
    /// Replace the neighbor search.
    pub fn with_neighbor_search<N2: NeighborSearch>(self, search: N2) -> SpectralClustering<N2, E> {
        SpectralClustering {
            params: self.params,
            search,
            solver: self.solver,
        }
    }

    /// Replace the eigensolver.
    pub fn with_eigen_solver<E2: EigenSolver>(self, solver: E2) -> SpectralClustering<N, E2> {
        SpectralClustering {
            params: self.params,
            search: self.search,
            solver,
        }
    }

    pub fn params(&self) -> &SpectralParams {
        &self.params
    }

    /// Cluster `points` and return the labels only.
    pub fn fit_predict(&self, points: &[Vec<f32>]) -> Result<Vec<usize>> {
        self.fit(points).map(|r| r.labels)
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// - [`SpectralError::EmptyInput`] / [`SpectralError::DimensionMismatch`] for malformed points.
    /// - [`SpectralError::InvalidParameter`] if `n < 2`, `k == 0`, `k > n`, `n_neighbors == 0`,
    ///   or the embedding needs more points than available (`k + 1 > n`).
    /// - [`SpectralError::NumericalError`] / [`SpectralError::ContractViolation`] from the
    ///   eigensolver, k-means, or neighbor search, unchanged.
    pub fn fit(&self, points: &[Vec<f32>]) -> Result<ClusteringResult> {
        let params = &self.params;
        params.validate()?;
        check_points(points)?;

        let n = points.len();
        let k = params.n_clusters;
        if n < 2 {
            return Err(SpectralError::InvalidParameter(format!(
                "need at least 2 points, got {n}"
            )));
        }
        if k > n {
            return Err(SpectralError::InvalidParameter(format!(
                "n_clusters ({k}) exceeds number of points ({n})"
            )));
        }

        let m = if params.n_neighbors > n - 1 {
            warn!(
                requested = params.n_neighbors,
                clamped = n - 1,
                "n_neighbors exceeds n - 1; clamping"
            );
            n - 1
        } else {
            params.n_neighbors
        };

        let table = self.search.neighbor_table(points, m)?;
        if table.num_points() != n || table.m() != m {
            return Err(SpectralError::ContractViolation(format!(
                "neighbor search returned a {}x{} table, expected {n}x{m}",
                table.num_points(),
                table.m()
            )));
        }
        stage!(params.verbose, n, m, "built neighbor table");

        let mut graph = AdjacencyMatrix::from_neighbor_table(&table);
        stage!(params.verbose, edges = graph.num_edges(), "built mutual-nearest-neighbor graph");

        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let repair = repair_connectivity(&mut graph, &params.repair, &mut rng);
        stage!(
            params.verbose,
            components = repair.components_before,
            edges_added = repair.edges_added,
            "connected graph"
        );

        let embedding = spectral_embedding(&graph, k, &self.solver)?;
        stage!(
            params.verbose,
            dimension = embedding.dimension(),
            eigenvalues = ?embedding.eigenvalues(),
            "computed spectral embedding"
        );

        let mut kmeans = KMeans::new(embedding.dimension(), k)?.with_params(params.kmeans.clone());
        kmeans.fit(embedding.as_slice(), embedding.num_points())?;
        stage!(
            params.verbose,
            inertia = kmeans.inertia(),
            iterations = kmeans.n_iter(),
            "k-means on embedding"
        );

        Ok(ClusteringResult {
            labels: kmeans.labels().to_vec(),
            inertia: kmeans.inertia(),
            embedding,
            repair,
            n_neighbors: m,
        })
    }
}

/// Cluster `points` into `k` groups using an `m`-nearest-neighbor graph.
///
/// Default seeds, exact neighbor search, dense eigensolver. `m` above `n - 1`
/// is clamped; see [`SpectralClustering::fit`] for errors.
pub fn spectral_clustering(points: &[Vec<f32>], k: usize, m: usize, verbose: bool) -> Result<Vec<usize>> {
    let params = SpectralParams::new(k)
        .with_n_neighbors(m)
        .with_verbose(verbose);
    SpectralClustering::new(params).fit_predict(points)
}
