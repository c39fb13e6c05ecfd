use std::fmt::{Display, Formatter};
use std::mem::size_of;

use crate::types::Edge;

pub type Vertex = usize;
/// Capacity of a single directed edge as loaded from the input.
pub type Capacity = u32;
/// Residual capacities and accumulated flow. Wide enough to hold the sum of
/// both directions of an edge pair and the total out of any vertex.
pub type Flow = u64;

/// Dense `size x size` capacity matrix indexed by vertex id.
///
/// The diagonal is always zero: `set` ignores self loops.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapacityMatrix {
    size: usize,
    capacities: Vec<Capacity>,
}

impl CapacityMatrix {
    pub fn new(size: usize) -> CapacityMatrix {
        CapacityMatrix {
            size,
            capacities: vec![0; size * size],
        }
    }

    /// Allocates a matrix for `node_count` 1-based vertices, i.e. with
    /// `node_count + 1` slots. Returns `None` if the matrix, or the residual
    /// matrix built from it later, cannot be allocated.
    pub fn try_for_nodes(node_count: usize) -> Option<CapacityMatrix> {
        let size = node_count.checked_add(1)?;
        let entries = size.checked_mul(size)?;
        // The residual matrix holds the same number of `Flow` entries.
        let bytes = entries.checked_mul(size_of::<Flow>())?;
        if bytes > isize::MAX as usize {
            return None;
        }
        let mut capacities = Vec::new();
        capacities.try_reserve_exact(entries).ok()?;
        capacities.resize(entries, 0);
        Some(CapacityMatrix { size, capacities })
    }

    pub fn from_edges(size: usize, edges: &[Edge]) -> CapacityMatrix {
        let mut matrix = CapacityMatrix::new(size);
        for edge in edges {
            matrix.set(edge.from, edge.to, edge.capacity);
        }
        matrix
    }

    /// Number of allocated vertex slots, i.e. valid ids are `0..size()`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, v: Vertex) -> bool {
        v < self.size
    }

    pub fn get(&self, from: Vertex, to: Vertex) -> Capacity {
        self.capacities[self.index(from, to)]
    }

    /// Overwrites the capacity of `from -> to`. Returns false if the edge
    /// was not recorded (self loop or out of range).
    pub fn set(&mut self, from: Vertex, to: Vertex, capacity: Capacity) -> bool {
        if from == to || !self.contains(from) || !self.contains(to) {
            return false;
        }
        let i = self.index(from, to);
        self.capacities[i] = capacity;
        true
    }

    /// Sum of capacities leaving `v`, an upper bound for any flow out of it.
    pub fn outgoing_capacity(&self, v: Vertex) -> Flow {
        self.row(v).iter().map(|c| Flow::from(*c)).sum()
    }

    pub fn row(&self, v: Vertex) -> &[Capacity] {
        &self.capacities[v * self.size..(v + 1) * self.size]
    }

    /// All edges with non-zero capacity, ordered by `(from, to)`.
    pub fn edges(&self) -> Vec<Edge> {
        let mut result = Vec::new();
        for from in 0..self.size {
            for (to, capacity) in self.row(from).iter().enumerate() {
                if *capacity != 0 {
                    result.push(Edge {
                        from,
                        to,
                        capacity: *capacity,
                    });
                }
            }
        }
        result
    }

    pub fn edge_count(&self) -> usize {
        self.capacities.iter().filter(|c| **c != 0).count()
    }

    fn index(&self, from: Vertex, to: Vertex) -> usize {
        from * self.size + to
    }
}

impl Display for CapacityMatrix {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} vertex slots, {} edges",
            self.size,
            self.edge_count()
        )
    }
}
