//! mnn-spectral: spectral clustering over mutual-nearest-neighbor graphs.
//!
//! Pipeline, one module per stage:
//!
//! - `neighbors`: per-point nearest-neighbor tables (exact brute force, or any [`NeighborSearch`])
//! - `graph`: adjacency construction, connected components, connectivity repair
//! - `spectral`: graph Laplacian and eigen-band embedding
//! - `partitioning`: k-means on the embedding
//! - `cluster`: the driver tying it together
//!
//! # Quick start
//!
//! ```rust
//! use mnn_spectral::spectral_clustering;
//!
//! // Two rows of six points, far apart.
//! let points: Vec<Vec<f32>> = (0..12)
//!     .map(|i| {
//!         let (x0, y) = if i < 6 { (0.0, 0.0) } else { (20.0, 5.0) };
//!         vec![x0 + (i % 6) as f32 * 0.1, y]
//!     })
//!     .collect();
//! let labels = spectral_clustering(&points, 2, 3, false).unwrap();
//! assert!(labels[..6].iter().all(|&l| l == labels[0]));
//! assert!(labels[6..].iter().all(|&l| l == labels[6]));
//! assert_ne!(labels[0], labels[6]);
//! ```
//!
//! # Critical Nuances
//!
//! ## "Mutual" means union
//!
//! Points `i` and `j` are connected if **either** lists the other among its
//! `M` nearest neighbors. The intersection would drop hubs' edges and leave
//! far more isolated vertices.
//!
//! ## Why repair is needed
//!
//! kNN graphs over separated data fall apart into one component per cluster.
//! The Laplacian then has one zero eigenvalue per component, and "skip the
//! trivial eigenvector" stops meaning anything. Repair adds `c - 1` random
//! bridge edges so exactly one zero eigenvalue remains. The bridges are weak
//! (one edge between whole clusters), so the next eigenvectors still separate
//! the clusters.
//!
//! ## Cost
//!
//! Dense throughout: O(n²) memory for the graph and Laplacian, O(n³) for the
//! eigendecomposition. Fine for thousands of points, not for millions.

pub mod benchmark;
pub mod cluster;
pub mod distance;
pub mod error;
pub mod graph;
pub mod neighbors;
pub mod partitioning;
pub mod spectral;

// Re-exports
pub use cluster::{spectral_clustering, ClusteringResult, SpectralClustering, SpectralParams};
pub use error::{Result, SpectralError};
pub use graph::{AdjacencyMatrix, RepairConfig, RepairStats, RepairStrategy};
pub use neighbors::{BruteForceSearch, NeighborSearch, NeighborTable};
pub use spectral::{DenseEigenSolver, EigenSolver, Embedding};
