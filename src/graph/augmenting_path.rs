use std::collections::VecDeque;

use crate::graph::residual::ResidualGraph;
use crate::types::Vertex;

/// A shortest augmenting path, stored as the parent chain from the sink
/// back to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath(Vec<Vertex>);

impl AugmentingPath {
    /// Vertices in source to sink order.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.0.iter().rev().copied().collect()
    }

    /// Edges `(u, v)` of the path, walking from the sink towards the source.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.0.windows(2).map(|window| (window[1], window[0]))
    }
}

/// Transient state of one breadth-first search.
pub struct SearchTree {
    parent: Vec<Option<Vertex>>,
    visited: Vec<bool>,
}

impl SearchTree {
    pub fn into_visited(self) -> Vec<bool> {
        self.visited
    }
}

/// Breadth-first search over edges with positive residual capacity.
/// Stops as soon as `stop_at` is discovered.
pub fn breadth_first_search(
    graph: &ResidualGraph,
    source: Vertex,
    stop_at: Option<Vertex>,
) -> SearchTree {
    let mut tree = SearchTree {
        parent: vec![None; graph.size()],
        visited: vec![false; graph.size()],
    };
    let mut queue = VecDeque::new();
    tree.visited[source] = true;
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        for (target, _) in graph.outgoing_edges(node) {
            if tree.visited[target] {
                continue;
            }
            tree.visited[target] = true;
            tree.parent[target] = Some(node);
            if Some(target) == stop_at {
                return tree;
            }
            queue.push_back(target);
        }
    }
    tree
}

pub fn augmenting_path(
    graph: &ResidualGraph,
    source: Vertex,
    sink: Vertex,
) -> Option<AugmentingPath> {
    if source == sink {
        return None;
    }
    let tree = breadth_first_search(graph, source, Some(sink));
    if tree.visited[sink] {
        Some(trace(&tree, source, sink))
    } else {
        None
    }
}

fn trace(tree: &SearchTree, source: Vertex, sink: Vertex) -> AugmentingPath {
    let mut t = vec![sink];
    let mut node = sink;
    while node != source {
        match tree.parent[node] {
            Some(parent) => node = parent,
            None => break,
        }
        t.push(node);
    }
    AugmentingPath(t)
}
