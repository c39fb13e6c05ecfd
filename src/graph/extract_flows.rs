use crate::graph::residual::ResidualGraph;
use crate::types::{Capacity, CapacityMatrix, Edge, Flow, Vertex};

/// Net flow on every edge, read off the difference between capacity and
/// residual capacity. Edges without flow are omitted.
pub fn extract_flows(capacities: &CapacityMatrix, residual: &ResidualGraph) -> Vec<Edge> {
    let mut flows = Vec::new();
    for from in 0..capacities.size() {
        for (to, capacity) in capacities.row(from).iter().enumerate() {
            let capacity = Flow::from(*capacity);
            let remaining = residual.residual(from, to);
            if capacity > remaining {
                // Bounded by the capacity, so it fits.
                let used = (capacity - remaining) as Capacity;
                flows.push(Edge::new(from, to, used));
            }
        }
    }
    flows
}

/// Sorted list of the vertices marked in `side`.
pub fn cut_vertices(side: &[bool]) -> Vec<Vertex> {
    side.iter()
        .enumerate()
        .filter(|(_, inside)| **inside)
        .map(|(v, _)| v)
        .collect()
}

/// Total capacity of the edges leaving the vertex set `side`.
pub fn cut_capacity(capacities: &CapacityMatrix, side: &[bool]) -> Flow {
    let mut total = 0;
    for from in 0..capacities.size() {
        if !side[from] {
            continue;
        }
        for (to, capacity) in capacities.row(from).iter().enumerate() {
            if !side[to] {
                total += Flow::from(*capacity);
            }
        }
    }
    total
}
