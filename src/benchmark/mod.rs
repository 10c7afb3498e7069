//! Evaluation utilities for clustering quality.
//!
//! - **Datasets**: Gaussian blobs with known ground-truth labels
//! - **Metrics**: adjusted Rand index, contingency counts
//!
//! Used by the integration tests, benches, and demos; nothing in the
//! clustering pipeline depends on this module.

pub mod datasets;
pub mod metrics;

pub use datasets::{generate_blobs, grid_centers, LabeledDataset};
pub use metrics::{adjusted_rand_index, contingency_table};
