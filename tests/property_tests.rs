//! Property-based tests for graph construction, repair, and embedding.
//!
//! These tests verify invariants that should hold regardless of input:
//! - The adjacency matrix is symmetric and encodes exactly the union rule
//! - Repair always yields one component using exactly `c - 1` new edges
//! - A connected graph's Laplacian has exactly one zero eigenvalue

use mnn_spectral::graph::{connected_components, repair_connectivity, RepairStrategy};
use mnn_spectral::spectral::{laplacian, DenseEigenSolver, EigenSolver};
use mnn_spectral::{AdjacencyMatrix, NeighborTable, RepairConfig};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A neighbor table with n points and 1 <= m < n arbitrary in-range entries.
fn arb_table() -> impl Strategy<Value = NeighborTable> {
    (2usize..24)
        .prop_flat_map(|n| (Just(n), 1..n))
        .prop_flat_map(|(n, m)| (Just(n), Just(m), prop::collection::vec(0..n as u32, n * m)))
        .prop_map(|(n, m, entries)| NeighborTable::new(entries, n, m).unwrap())
}

prop_compose! {
    /// An arbitrary undirected graph on up to 20 vertices.
    fn arb_graph()(n in 1usize..20)
        (edges in prop::collection::vec((0..n, 0..n), 0..(n * 2)), n in Just(n))
        -> AdjacencyMatrix
    {
        AdjacencyMatrix::from_edges(n, &edges).unwrap()
    }
}

fn arb_strategy() -> impl Strategy<Value = RepairStrategy> {
    prop_oneof![Just(RepairStrategy::Chain), Just(RepairStrategy::Star)]
}

mod adjacency_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn adjacency_is_symmetric(table in arb_table()) {
            let g = AdjacencyMatrix::from_neighbor_table(&table);
            let n = table.num_points();
            for i in 0..n {
                for j in 0..n {
                    prop_assert_eq!(g.get(i, j), g.get(j, i), "asymmetric at ({}, {})", i, j);
                }
            }
        }

        #[test]
        fn adjacency_is_exactly_the_union_rule(table in arb_table()) {
            let g = AdjacencyMatrix::from_neighbor_table(&table);
            let n = table.num_points();
            for i in 0..n {
                for j in 0..n {
                    let expected = table.contains(i, j as u32) || table.contains(j, i as u32);
                    prop_assert_eq!(
                        g.get(i, j),
                        expected,
                        "edge ({}, {}) disagrees with the neighbor table",
                        i, j
                    );
                }
            }
        }
    }
}

mod repair_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn repair_connects_with_c_minus_one_edges(
            mut g in arb_graph(),
            strategy in arb_strategy(),
            seed in any::<u64>(),
        ) {
            let c = connected_components(&g).len();
            let before = g.num_edges();

            let stats = repair_connectivity(
                &mut g,
                &RepairConfig { strategy },
                &mut StdRng::seed_from_u64(seed),
            );

            prop_assert_eq!(stats.components_before, c);
            prop_assert_eq!(stats.edges_added, c - 1);
            prop_assert_eq!(g.num_edges(), before + c - 1);
            prop_assert_eq!(connected_components(&g).len(), 1);
            prop_assert!(g.is_symmetric());
        }

        #[test]
        fn repair_only_adds_edges(mut g in arb_graph(), seed in any::<u64>()) {
            let original = g.clone();
            repair_connectivity(&mut g, &RepairConfig::default(), &mut StdRng::seed_from_u64(seed));
            let n = g.num_vertices();
            for i in 0..n {
                for j in 0..n {
                    if original.get(i, j) {
                        prop_assert!(g.get(i, j));
                    }
                }
            }
        }

        #[test]
        fn repair_is_idempotent(mut g in arb_graph(), seed in any::<u64>()) {
            repair_connectivity(&mut g, &RepairConfig::default(), &mut StdRng::seed_from_u64(seed));
            let once = g.clone();
            let stats = repair_connectivity(&mut g, &RepairConfig::default(), &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(stats.edges_added, 0);
            prop_assert_eq!(g, once);
        }
    }
}

mod spectral_props {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn connected_laplacian_has_single_zero_eigenvalue(
            mut g in arb_graph(),
            seed in any::<u64>(),
        ) {
            repair_connectivity(&mut g, &RepairConfig::default(), &mut StdRng::seed_from_u64(seed));
            let n = g.num_vertices();
            let (values, _) = DenseEigenSolver::default()
                .eigh_band(&laplacian(&g), 0..n)
                .unwrap();

            let zeros = values.iter().filter(|v| v.abs() < 1e-8).count();
            prop_assert_eq!(zeros, 1, "eigenvalues: {:?}", values);
            prop_assert!(values.iter().all(|&v| v > -1e-8), "Laplacian must be PSD");
        }
    }
}
