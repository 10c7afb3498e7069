//! Mutual-nearest-neighbor graph: construction, components, and repair.
//!
//! The graph is a dense, symmetric, binary adjacency matrix. Dense is fine at
//! the sizes spectral clustering is used for (the Laplacian eigendecomposition
//! is O(n³) anyway), and it makes the union rule and the Laplacian trivial.
//!
//! Lifecycle of one clustering call:
//!
//! 1. [`AdjacencyMatrix::from_neighbor_table`] builds `G` from the neighbor table.
//! 2. [`repair_connectivity`] adds the fewest edges (`c - 1`) that make `G` connected.
//! 3. [`crate::spectral`] turns `G` into a Laplacian and an embedding.
//!
//! Edges are only ever added, never removed.

mod adjacency;
mod components;
pub mod repair;

pub use adjacency::AdjacencyMatrix;
pub use components::{connected_components, is_connected};
pub use repair::{repair_connectivity, RepairConfig, RepairStats, RepairStrategy};
