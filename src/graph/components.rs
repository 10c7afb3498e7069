//! Connected components of an adjacency matrix.

use std::collections::VecDeque;

use super::AdjacencyMatrix;

/// Partition the vertices into connected components.
///
/// BFS from each unvisited vertex in increasing index order, so components
/// come out ordered by their smallest member, and each component's members
/// are sorted ascending. The result is a pure function of the matrix.
pub fn connected_components(graph: &AdjacencyMatrix) -> Vec<Vec<u32>> {
    let n = graph.num_vertices();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        let mut members = Vec::new();
        while let Some(v) = queue.pop_front() {
            members.push(v as u32);
            for u in graph.neighbors(v) {
                if !visited[u] {
                    visited[u] = true;
                    queue.push_back(u);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}

/// True if the graph has exactly one component.
///
/// An empty graph has zero components and is not connected.
pub fn is_connected(graph: &AdjacencyMatrix) -> bool {
    connected_components(graph).len() == 1
}
