//! k-means clustering implementation.
//!
//! Lloyd's algorithm with k-means++ seeding, used to cut the spectral
//! embedding into clusters. Vectors are passed as a flat row-major (SoA)
//! buffer, like the embedding stores them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::l2_distance_squared;
use crate::error::{Result, SpectralError};

/// Tunables for [`KMeans`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansParams {
    /// Independent k-means++ restarts; the lowest inertia wins.
    pub n_init: usize,
    /// Lloyd iterations per restart.
    pub max_iter: usize,
    /// Stop once no centroid moves farther than this (L2).
    pub tol: f32,
    /// Seed for k-means++ sampling. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            seed: Some(0),
        }
    }
}

/// k-means clustering under squared Euclidean distance.
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Centroids (k x dimension)
    centroids: Vec<Vec<f32>>,
    labels: Vec<usize>,
    inertia: f32,
    n_iter: usize,
    dimension: usize,
    k: usize,
    params: KMeansParams,
}

impl KMeans {
    /// Create new k-means with k clusters.
    pub fn new(dimension: usize, k: usize) -> Result<Self> {
        if dimension == 0 || k == 0 {
            return Err(SpectralError::InvalidParameter(
                "dimension and k must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            centroids: Vec::new(),
            labels: Vec::new(),
            inertia: 0.0,
            n_iter: 0,
            dimension,
            k,
            params: KMeansParams::default(),
        })
    }

    /// Replace all tunables at once.
    #[must_use]
    pub fn with_params(mut self, params: KMeansParams) -> Self {
        self.params = params;
        self
    }

    /// Configure a deterministic seed for k-means++ initialization.
    ///
    /// When set, repeated `fit(...)` calls on the same inputs produce identical results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Number of k-means++ restarts.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.params.n_init = n_init;
        self
    }

    /// Train k-means on `num_vectors` row-major vectors.
    ///
    /// # Errors
    ///
    /// - [`SpectralError::InvalidParameter`] if `k > num_vectors`, or `n_init`/`max_iter` is 0.
    /// - [`SpectralError::ContractViolation`] if `vectors` is shorter than `num_vectors * dimension`.
    /// - [`SpectralError::NumericalError`] if the vectors contain non-finite values.
    pub fn fit(&mut self, vectors: &[f32], num_vectors: usize) -> Result<()> {
        if vectors.len() < num_vectors * self.dimension {
            return Err(SpectralError::ContractViolation(format!(
                "expected {} values for {num_vectors} vectors of dimension {}, got {}",
                num_vectors * self.dimension,
                self.dimension,
                vectors.len()
            )));
        }
        if self.k > num_vectors {
            return Err(SpectralError::InvalidParameter(format!(
                "k ({}) must be <= number of vectors ({num_vectors})",
                self.k
            )));
        }
        if self.params.n_init == 0 || self.params.max_iter == 0 {
            return Err(SpectralError::InvalidParameter(
                "n_init and max_iter must be greater than 0".to_string(),
            ));
        }
        if vectors[..num_vectors * self.dimension]
            .iter()
            .any(|x| !x.is_finite())
        {
            return Err(SpectralError::NumericalError(
                "k-means input contains non-finite values".to_string(),
            ));
        }

        // Use an explicit seed when configured; otherwise derive one from entropy.
        let seed = self.params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        let mut best: Option<(Vec<Vec<f32>>, Vec<usize>, f32, usize)> = None;
        for _ in 0..self.params.n_init {
            let (centroids, labels, inertia, n_iter) = self.lloyd(vectors, num_vectors, &mut rng);
            if best.as_ref().map_or(true, |b| inertia < b.2) {
                best = Some((centroids, labels, inertia, n_iter));
            }
        }

        if let Some((centroids, labels, inertia, n_iter)) = best {
            self.centroids = centroids;
            self.labels = labels;
            self.inertia = inertia;
            self.n_iter = n_iter;
        }

        Ok(())
    }

    /// One k-means++ seeding followed by Lloyd refinement.
    fn lloyd(
        &self,
        vectors: &[f32],
        num_vectors: usize,
        rng: &mut StdRng,
    ) -> (Vec<Vec<f32>>, Vec<usize>, f32, usize) {
        let mut centroids = self.kmeans_plus_plus(vectors, num_vectors, rng);
        let mut labels = assign(&centroids, vectors, num_vectors, self.dimension);
        let mut n_iter = 0;

        for iteration in 0..self.params.max_iter {
            n_iter = iteration + 1;
            let new_centroids = self.update_centroids(vectors, num_vectors, &labels, &centroids);

            let shift = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(old, new)| l2_distance_squared(old, new))
                .fold(0.0f32, f32::max);

            centroids = new_centroids;
            labels = assign(&centroids, vectors, num_vectors, self.dimension);

            if shift <= self.params.tol * self.params.tol {
                break;
            }
        }

        let inertia: f32 = (0..num_vectors)
            .map(|i| l2_distance_squared(self.get_vector(vectors, i), &centroids[labels[i]]))
            .sum();

        (centroids, labels, inertia, n_iter)
    }

    /// k-means++ initialization.
    fn kmeans_plus_plus(&self, vectors: &[f32], num_vectors: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
        let mut centroids = Vec::with_capacity(self.k);

        // First centroid: random vector
        let first_idx = rng.random_range(0..num_vectors);
        centroids.push(self.get_vector(vectors, first_idx).to_vec());

        let mut min_dists: Vec<f32> = (0..num_vectors)
            .map(|i| l2_distance_squared(self.get_vector(vectors, i), &centroids[0]))
            .collect();

        // Subsequent centroids: sampled proportional to squared distance
        for _ in 1..self.k {
            let total: f64 = min_dists.iter().map(|&d| d as f64).sum();

            let next = if total > 0.0 {
                let threshold = rng.random::<f64>() * total;
                let mut cumulative = 0.0;
                let mut chosen = min_dists
                    .iter()
                    .rposition(|&d| d > 0.0)
                    .unwrap_or(num_vectors - 1);
                for (i, &d) in min_dists.iter().enumerate() {
                    cumulative += d as f64;
                    if d > 0.0 && cumulative >= threshold {
                        chosen = i;
                        break;
                    }
                }
                chosen
            } else {
                // Every vector coincides with a centroid already.
                rng.random_range(0..num_vectors)
            };

            let centroid = self.get_vector(vectors, next).to_vec();
            for (i, d) in min_dists.iter_mut().enumerate() {
                *d = d.min(l2_distance_squared(self.get_vector(vectors, i), &centroid));
            }
            centroids.push(centroid);
        }

        centroids
    }

    /// Update centroids based on assignments.
    fn update_centroids(
        &self,
        vectors: &[f32],
        num_vectors: usize,
        assignments: &[usize],
        previous: &[Vec<f32>],
    ) -> Vec<Vec<f32>> {
        let mut cluster_sums = vec![vec![0.0f32; self.dimension]; self.k];
        let mut cluster_counts = vec![0usize; self.k];

        for (i, &cluster) in assignments.iter().enumerate().take(num_vectors) {
            cluster_counts[cluster] += 1;

            let vec = self.get_vector(vectors, i);
            for (j, &val) in vec.iter().enumerate() {
                cluster_sums[cluster][j] += val;
            }
        }

        cluster_sums
            .into_iter()
            .zip(cluster_counts.iter())
            .zip(previous.iter())
            .map(|((sums, &count), old)| {
                if count > 0 {
                    sums.iter().map(|&s| s / count as f32).collect()
                } else {
                    // Empty cluster: keep old centroid
                    old.clone()
                }
            })
            .collect()
    }

    /// Get vector from SoA storage.
    fn get_vector<'a>(&self, vectors: &'a [f32], idx: usize) -> &'a [f32] {
        let start = idx * self.dimension;
        &vectors[start..start + self.dimension]
    }

    /// Assign vectors to nearest clusters.
    pub fn assign_clusters(&self, vectors: &[f32], num_vectors: usize) -> Vec<usize> {
        assign(&self.centroids, vectors, num_vectors, self.dimension)
    }

    /// Get centroids.
    pub fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }

    /// Labels of the training vectors from the last `fit`.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Within-cluster sum of squared distances of the best restart.
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Lloyd iterations used by the best restart.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }
}

/// Nearest centroid for each vector; ties go to the lower cluster index.
fn assign(centroids: &[Vec<f32>], vectors: &[f32], num_vectors: usize, dimension: usize) -> Vec<usize> {
    (0..num_vectors)
        .map(|i| {
            let vec = &vectors[i * dimension..(i + 1) * dimension];
            let mut best_cluster = 0;
            let mut best_dist = f32::INFINITY;
            for (cluster_idx, centroid) in centroids.iter().enumerate() {
                let dist = l2_distance_squared(vec, centroid);
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = cluster_idx;
                }
            }
            best_cluster
        })
        .collect()
}
