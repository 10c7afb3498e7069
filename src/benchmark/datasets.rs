//! Synthetic labeled datasets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Points together with the cluster each was drawn from.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    /// Sampled points
    pub points: Vec<Vec<f32>>,
    /// Index of the center each point was sampled around
    pub labels: Vec<usize>,
    /// Point dimensionality
    pub dimension: usize,
}

impl LabeledDataset {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct ground-truth clusters.
    pub fn n_clusters(&self) -> usize {
        self.labels.iter().max().map_or(0, |&m| m + 1)
    }
}

/// Sample `per_cluster` points around each center with Gaussian noise.
///
/// Points are grouped by center: the first `per_cluster` belong to
/// `centers[0]`, and so on.
///
/// # Arguments
///
/// * `centers` - Cluster centers, all of the same dimension
/// * `per_cluster` - Points per center
/// * `cluster_std` - Standard deviation within clusters
/// * `seed` - Random seed for reproducibility
pub fn generate_blobs(centers: &[Vec<f32>], per_cluster: usize, cluster_std: f32, seed: u64) -> LabeledDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let dimension = centers.first().map_or(0, Vec::len);

    // Box-Muller for Gaussian
    let gaussian = |rng: &mut StdRng| -> f32 {
        let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
        let u2: f32 = rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
    };

    let mut points = Vec::with_capacity(centers.len() * per_cluster);
    let mut labels = Vec::with_capacity(centers.len() * per_cluster);
    for (label, center) in centers.iter().enumerate() {
        for _ in 0..per_cluster {
            points.push(center.iter().map(|&c| c + gaussian(&mut rng) * cluster_std).collect());
            labels.push(label);
        }
    }

    LabeledDataset {
        points,
        labels,
        dimension,
    }
}

/// `count` 2D centers on a square grid with the given spacing.
pub fn grid_centers(count: usize, spacing: f32) -> Vec<Vec<f32>> {
    let side = (count as f32).sqrt().ceil().max(1.0) as usize;
    (0..count)
        .map(|i| vec![(i % side) as f32 * spacing, (i / side) as f32 * spacing])
        .collect()
}
