//! Dense binary adjacency matrix and the mutual-nearest-neighbor rule.

use crate::error::{Result, SpectralError};
use crate::neighbors::NeighborTable;

/// Symmetric binary `n x n` adjacency matrix.
///
/// `get(i, j) == get(j, i)` always holds: the only mutator, [`add_edge`](Self::add_edge),
/// sets both entries. A diagonal entry is a self-loop; it counts toward the degree
/// but cancels out of the Laplacian and is ignored by component detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// Graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Mutual-nearest-neighbor graph from a neighbor table.
    ///
    /// Vertices `i` and `j` are connected iff `j` is among the neighbors of `i`
    /// **or** `i` is among the neighbors of `j`. Despite the name this is the
    /// union of the two directed relations, not their intersection.
    ///
    /// Equivalent to testing that rule for every pair, but walks each row once
    /// (O(n·m) after allocation).
    pub fn from_neighbor_table(table: &NeighborTable) -> Self {
        let mut g = Self::new(table.num_points());
        for (i, row) in table.rows().enumerate() {
            for &j in row {
                g.add_edge(i, j as usize);
            }
        }
        g
    }

    /// Graph from an explicit undirected edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut g = Self::new(n);
        for &(i, j) in edges {
            if i >= n || j >= n {
                return Err(SpectralError::InvalidParameter(format!(
                    "edge ({i}, {j}) out of range for {n} vertices"
                )));
            }
            g.add_edge(i, j);
        }
        Ok(g)
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    /// True if `i` and `j` are connected.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.n + j] != 0
    }

    /// Connect `i` and `j` (both directions). Returns `true` if the edge is new.
    #[inline]
    pub fn add_edge(&mut self, i: usize, j: usize) -> bool {
        let was_set = self.get(i, j);
        self.cells[i * self.n + j] = 1;
        self.cells[j * self.n + i] = 1;
        !was_set
    }

    /// Row sum of vertex `i`, including a self-loop if present.
    pub fn degree(&self, i: usize) -> usize {
        self.cells[i * self.n..(i + 1) * self.n]
            .iter()
            .map(|&c| c as usize)
            .sum()
    }

    /// Neighbors of `i`, excluding `i` itself, in increasing order.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells[i * self.n..(i + 1) * self.n]
            .iter()
            .enumerate()
            .filter(move |&(j, &c)| c != 0 && j != i)
            .map(|(j, _)| j)
    }

    /// Number of undirected edges between distinct vertices.
    pub fn num_edges(&self) -> usize {
        (0..self.n)
            .map(|i| ((i + 1)..self.n).filter(|&j| self.get(i, j)).count())
            .sum()
    }

    /// True if `get(i, j) == get(j, i)` everywhere.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| ((i + 1)..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_rule_on_one_directional_neighbors() {
        // 0 -> 1, 1 -> 0, 2 -> 1: edge (1, 2) exists although 2 is not a neighbor of 1.
        let table = NeighborTable::from_rows(&[vec![1], vec![0], vec![1]]).unwrap();
        let g = AdjacencyMatrix::from_neighbor_table(&table);
        assert!(g.get(0, 1) && g.get(1, 0));
        assert!(g.get(1, 2) && g.get(2, 1));
        assert!(!g.get(0, 2));
        assert_eq!(g.num_edges(), 2);
        assert!(g.is_symmetric());
    }

    #[test]
    fn full_neighbor_table_gives_complete_graph() {
        let rows: Vec<Vec<u32>> = (0..4u32)
            .map(|i| (0..4u32).filter(|&j| j != i).collect())
            .collect();
        let table = NeighborTable::from_rows(&rows).unwrap();
        let g = AdjacencyMatrix::from_neighbor_table(&table);
        assert_eq!(g.num_edges(), 6);
        for i in 0..4 {
            assert_eq!(g.degree(i), 3);
            assert!(!g.get(i, i));
        }
    }

    #[test]
    fn self_index_sets_diagonal_only() {
        let table = NeighborTable::from_rows(&[vec![0], vec![0]]).unwrap();
        let g = AdjacencyMatrix::from_neighbor_table(&table);
        assert!(g.get(0, 0));
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn add_edge_reports_novelty() {
        let mut g = AdjacencyMatrix::new(3);
        assert!(g.add_edge(0, 2));
        assert!(!g.add_edge(2, 0));
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn from_edges_rejects_out_of_range() {
        assert!(AdjacencyMatrix::from_edges(3, &[(0, 3)]).is_err());
        let g = AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(g.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }
}
