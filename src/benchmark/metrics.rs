//! Agreement metrics between two labelings.
//!
//! Cluster ids are arbitrary, so these compare partitions, not label values:
//! `[0, 0, 1]` and `[5, 5, 2]` describe the same clustering.

use std::collections::HashMap;

/// Contingency counts `n_ij`: points labeled `i` in `a` and `j` in `b`.
///
/// Returns the table together with the row sums (`a` cluster sizes) and
/// column sums (`b` cluster sizes).
pub fn contingency_table(
    a: &[usize],
    b: &[usize],
) -> (HashMap<(usize, usize), u64>, HashMap<usize, u64>, HashMap<usize, u64>) {
    let mut table = HashMap::new();
    let mut rows = HashMap::new();
    let mut cols = HashMap::new();
    for (&x, &y) in a.iter().zip(b.iter()) {
        *table.entry((x, y)).or_insert(0) += 1;
        *rows.entry(x).or_insert(0) += 1;
        *cols.entry(y).or_insert(0) += 1;
    }
    (table, rows, cols)
}

#[inline]
fn pairs(n: u64) -> f64 {
    (n * n.saturating_sub(1)) as f64 / 2.0
}

/// Adjusted Rand index (Hubert & Arabie, 1985).
///
/// 1.0 for identical partitions, about 0.0 for independent ones, and it can go
/// negative. Two trivial partitions (everything in one cluster, or every point
/// alone) that agree score 1.0.
///
/// # Returns
///
/// ARI in `[-1.0, 1.0]`; 0.0 if the inputs are empty or of different length.
pub fn adjusted_rand_index(labels_true: &[usize], labels_pred: &[usize]) -> f64 {
    let n = labels_true.len();
    if n == 0 || n != labels_pred.len() {
        return 0.0;
    }

    let (table, rows, cols) = contingency_table(labels_true, labels_pred);
    let index: f64 = table.values().map(|&c| pairs(c)).sum();
    let sum_rows: f64 = rows.values().map(|&c| pairs(c)).sum();
    let sum_cols: f64 = cols.values().map(|&c| pairs(c)).sum();

    let total = pairs(n as u64);
    let expected = if total > 0.0 { sum_rows * sum_cols / total } else { 0.0 };
    let max_index = (sum_rows + sum_cols) / 2.0;

    let denom = max_index - expected;
    if denom.abs() < f64::EPSILON {
        return 1.0;
    }
    (index - expected) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ari_identical_up_to_relabeling() {
        let a = [0, 0, 1, 1, 2, 2];
        let b = [5, 5, 3, 3, 9, 9];
        assert!((adjusted_rand_index(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_known_value() {
        // Standard example: ARI([0,0,1,1], [0,0,1,2]) = 0.5714...
        let ari = adjusted_rand_index(&[0, 0, 1, 1], &[0, 0, 1, 2]);
        assert!((ari - 4.0 / 7.0).abs() < 1e-9, "got {ari}");
    }

    #[test]
    fn test_ari_disagreeing_partitions() {
        let ari = adjusted_rand_index(&[0, 0, 1, 1], &[0, 1, 0, 1]);
        assert!(ari < 0.0);
    }

    #[test]
    fn test_ari_degenerate_inputs() {
        assert_eq!(adjusted_rand_index(&[], &[]), 0.0);
        assert_eq!(adjusted_rand_index(&[0, 1], &[0]), 0.0);
        assert_eq!(adjusted_rand_index(&[0, 0, 0], &[1, 1, 1]), 1.0);
    }

    #[test]
    fn test_contingency_counts() {
        let (table, rows, cols) = contingency_table(&[0, 0, 1], &[2, 3, 3]);
        assert_eq!(table[&(0, 2)], 1);
        assert_eq!(table[&(1, 3)], 1);
        assert_eq!(rows[&0], 2);
        assert_eq!(cols[&3], 2);
    }
}
