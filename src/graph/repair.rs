//! Connectivity repair for mutual-nearest-neighbor graphs.
//!
//! A kNN graph over well-separated data is usually disconnected: each cluster
//! forms its own component. The Laplacian of such a graph has one zero
//! eigenvalue per component, which makes the "skip the trivial eigenvector"
//! step of spectral embedding ill-defined. Repair merges the components with
//! the minimum number of synthetic edges.
//!
//! # Algorithm
//!
//! 1. Find the connected components, ordered by smallest member
//!    (see [`connected_components`]).
//! 2. For each consecutive pair `(C_i, C_{i+1})`, pick one vertex uniformly at
//!    random from each and connect them.
//!
//! This is a chain merge: `c` components gain exactly `c - 1` edges. A star
//! merge (every component linked to `C_0`) gives the same guarantee and is
//! available via [`RepairStrategy::Star`].
//!
//! The random source is always passed in. With a seeded RNG the added edges
//! are reproducible, because the component order is a pure function of the
//! matrix.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{connected_components, AdjacencyMatrix};

/// How components are linked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepairStrategy {
    /// Link component `i` to component `i + 1`.
    #[default]
    Chain,
    /// Link every component to component 0.
    Star,
}

/// Configuration for graph repair operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Component linking strategy
    pub strategy: RepairStrategy,
}

/// Statistics from a repair operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairStats {
    /// Components before repair
    pub components_before: usize,
    /// Edges added (always `components_before - 1`, or 0)
    pub edges_added: usize,
    /// The added edges, in insertion order
    pub added_edges: Vec<(u32, u32)>,
}

/// Make `graph` connected by adding one edge per extra component.
///
/// Draws exactly two values from `rng` per added edge (first the vertex in the
/// earlier component, then the later one) and nothing at all when the graph is
/// already connected.
pub fn repair_connectivity<R>(
    graph: &mut AdjacencyMatrix,
    config: &RepairConfig,
    rng: &mut R,
) -> RepairStats
where
    R: Rng + ?Sized,
{
    let components = connected_components(graph);
    let mut stats = RepairStats {
        components_before: components.len(),
        ..RepairStats::default()
    };

    if components.len() <= 1 {
        return stats;
    }

    for i in 1..components.len() {
        let anchor = match config.strategy {
            RepairStrategy::Chain => &components[i - 1],
            RepairStrategy::Star => &components[0],
        };
        let a = anchor[rng.random_range(0..anchor.len())];
        let b = components[i][rng.random_range(0..components[i].len())];

        // Different components, so the edge is always new.
        graph.add_edge(a as usize, b as usize);
        stats.added_edges.push((a, b));
        stats.edges_added += 1;
    }

    debug!(
        components = stats.components_before,
        edges_added = stats.edges_added,
        strategy = ?config.strategy,
        "repaired graph connectivity"
    );

    stats
}
