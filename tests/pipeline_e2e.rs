//! End-to-end tests validating spectral clustering actually works.
//!
//! These run the full pipeline (neighbor search, graph, repair, embedding,
//! k-means) on data with a known answer.

use mnn_spectral::benchmark::{adjusted_rand_index, generate_blobs, grid_centers};
use mnn_spectral::graph::{connected_components, is_connected, repair_connectivity};
use mnn_spectral::{
    spectral_clustering, AdjacencyMatrix, RepairConfig, SpectralClustering, SpectralError,
    SpectralParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Graph scenarios
// =============================================================================

#[test]
fn two_triangles_need_exactly_one_bridge() {
    let mut g =
        AdjacencyMatrix::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]).unwrap();
    assert_eq!(connected_components(&g).len(), 2);
    let before = g.num_edges();

    let stats = repair_connectivity(&mut g, &RepairConfig::default(), &mut StdRng::seed_from_u64(0));

    assert_eq!(stats.edges_added, 1);
    assert_eq!(g.num_edges(), before + 1);
    assert_eq!(connected_components(&g).len(), 1);
    assert!(is_connected(&g));
}

#[test]
fn bridged_triangles_with_two_clusters_split_on_a_triangle_mode() {
    // M = 2 makes each tight triple a triangle; repair adds one bridge.
    let points = vec![
        vec![0.0, 0.0], vec![0.1, 0.0], vec![0.0, 0.1],
        vec![9.0, 9.0], vec![9.1, 9.0], vec![9.0, 9.1],
    ];
    let result = SpectralClustering::new(SpectralParams::new(2).with_n_neighbors(2))
        .fit(&points)
        .unwrap();

    assert_eq!(result.repair.components_before, 2);
    assert_eq!(result.repair.added_edges, vec![(0, 4)]);

    // Columns: the Fiedler vector, then one vector of the triple eigenvalue 3.
    let emb = &result.embedding;
    let fiedler = (5.0 - 17f64.sqrt()) / 2.0;
    assert!((emb.eigenvalues()[0] - fiedler).abs() < 1e-9);
    assert!((emb.eigenvalues()[1] - 3.0).abs() < 1e-9);

    // The Fiedler column alone separates the triangles by sign.
    let side = |i: usize| emb.row(i)[0] > 0.0;
    assert!((0..3).all(|i| side(i) == side(0)));
    assert!((3..6).all(|i| side(i) == side(3)));
    assert_ne!(side(0), side(3));

    // The triangle mode dominates k-means: the bridge endpoints pair up.
    let labels = &result.labels;
    assert_eq!(labels[0], labels[4]);
    assert!([1, 2, 3, 5].iter().all(|&i| labels[i] == labels[1]));
    assert_ne!(labels[0], labels[1]);
}

// =============================================================================
// Clustering scenarios
// =============================================================================

#[test]
fn recovers_four_separated_blobs() {
    let data = generate_blobs(&grid_centers(4, 10.0), 10, 0.5, 42);
    assert_eq!(data.len(), 40);

    let result = SpectralClustering::new(SpectralParams::new(4).with_n_neighbors(5))
        .fit(&data.points)
        .expect("clustering succeeds");

    assert_eq!(result.labels.len(), 40);
    assert!(result.labels.iter().all(|&l| l < 4));
    // Five nearest neighbors never leave a blob, so each blob is a component.
    assert_eq!(result.repair.components_before, 4);
    assert_eq!(result.repair.edges_added, 3);

    let ari = adjusted_rand_index(&data.labels, &result.labels);
    assert!(ari > 0.9, "ARI too low: {ari:.3}");
}

#[test]
fn clamps_oversized_neighbor_count() {
    let data = generate_blobs(&grid_centers(2, 10.0), 6, 0.5, 1);
    let n = data.len();

    let result = SpectralClustering::new(SpectralParams::new(2).with_n_neighbors(n))
        .fit(&data.points)
        .expect("M = n is clamped, not rejected");

    assert_eq!(result.n_neighbors, n - 1);
    assert_eq!(result.labels.len(), n);
    // Complete graph: nothing to repair.
    assert_eq!(result.repair.components_before, 1);
}

#[test]
fn more_clusters_than_points_is_invalid() {
    let data = generate_blobs(&grid_centers(2, 10.0), 3, 0.5, 1);
    let err = spectral_clustering(&data.points, 7, 2, false).unwrap_err();
    assert!(matches!(err, SpectralError::InvalidParameter(_)), "got {err:?}");
}

#[test]
fn fixed_seeds_give_identical_labels() {
    let data = generate_blobs(&grid_centers(3, 4.0), 15, 1.0, 5);
    let clustering = SpectralClustering::new(SpectralParams::new(3).with_n_neighbors(4).with_seed(11));

    let a = clustering.fit(&data.points).unwrap();
    let b = clustering.fit(&data.points).unwrap();

    assert_eq!(a.labels, b.labels);
    assert_eq!(a.repair, b.repair);
    assert_eq!(a.embedding, b.embedding);
}

#[test]
fn free_function_matches_driver_defaults() {
    let data = generate_blobs(&grid_centers(2, 10.0), 8, 0.5, 3);
    let from_fn = spectral_clustering(&data.points, 2, 3, true).unwrap();
    let from_driver = SpectralClustering::new(SpectralParams::new(2).with_n_neighbors(3))
        .fit_predict(&data.points)
        .unwrap();
    assert_eq!(from_fn, from_driver);
}

#[test]
fn embedding_columns_skip_trivial_eigenvector() {
    let data = generate_blobs(&grid_centers(3, 10.0), 8, 0.5, 9);
    let result = SpectralClustering::new(SpectralParams::new(3).with_n_neighbors(3))
        .fit(&data.points)
        .unwrap();

    let emb = &result.embedding;
    assert_eq!(emb.dimension(), 3);
    assert!(emb.eigenvalues().iter().all(|&v| v > 1e-9));
    assert!(emb.eigenvalues().windows(2).all(|w| w[0] <= w[1]));
    for col in 0..emb.dimension() {
        let sum: f32 = (0..emb.num_points()).map(|i| emb.row(i)[col]).sum();
        assert!(sum.abs() < 1e-3, "column {col} correlates with the constant vector");
    }
}
