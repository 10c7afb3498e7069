//! Partitional clustering of embedded points.

pub mod kmeans;

pub use kmeans::{KMeans, KMeansParams};
