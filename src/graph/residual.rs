use crate::graph::augmenting_path::{augmenting_path, breadth_first_search, AugmentingPath};
use crate::types::{CapacityMatrix, Flow, Vertex};

/// Residual capacities of a capacity matrix.
///
/// For every pair `(u, v)` the sum `residual(u, v) + residual(v, u)` never
/// changes; augmentation only shifts capacity between the two directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualGraph {
    size: usize,
    residual: Vec<Flow>,
}

impl ResidualGraph {
    pub fn new(capacities: &CapacityMatrix) -> Self {
        let size = capacities.size();
        let mut residual = Vec::with_capacity(size * size);
        for from in 0..size {
            residual.extend(capacities.row(from).iter().map(|c| Flow::from(*c)));
        }
        ResidualGraph { size, residual }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn residual(&self, from: Vertex, to: Vertex) -> Flow {
        self.residual[from * self.size + to]
    }

    /// Targets reachable from `from` over an edge with positive residual
    /// capacity, in increasing vertex order.
    pub fn outgoing_edges(&self, from: Vertex) -> impl Iterator<Item = (Vertex, Flow)> + '_ {
        self.residual[from * self.size..(from + 1) * self.size]
            .iter()
            .enumerate()
            .filter(|(_, capacity)| **capacity > 0)
            .map(|(to, capacity)| (to, *capacity))
    }

    /// Shortest (fewest hops) path from `source` to `sink` in the residual
    /// graph, or `None` if the two are separated.
    pub fn find_augmenting_path(&self, source: Vertex, sink: Vertex) -> Option<AugmentingPath> {
        augmenting_path(self, source, sink)
    }

    /// Pushes the bottleneck capacity of `path` along it and returns that
    /// amount.
    pub fn apply_augmentation(&mut self, path: &AugmentingPath) -> Flow {
        let bottleneck = path
            .edges()
            .map(|(u, v)| self.residual(u, v))
            .min()
            .unwrap_or_default();
        for (u, v) in path.edges() {
            self.adjust_capacity(u, v, bottleneck);
        }
        bottleneck
    }

    /// Vertices reachable from `source` over positive residual edges.
    pub fn reachable_from(&self, source: Vertex) -> Vec<bool> {
        breadth_first_search(self, source, None).into_visited()
    }

    fn adjust_capacity(&mut self, from: Vertex, to: Vertex, amount: Flow) {
        let size = self.size;
        self.residual[from * size + to] -= amount;
        self.residual[to * size + from] += amount;
    }
}

#[cfg(test)]
mod test {
    use super::ResidualGraph;
    use crate::types::{CapacityMatrix, Edge};

    #[test]
    fn starts_as_copy() {
        let capacities = CapacityMatrix::from_edges(3, &[Edge::new(0, 1, 4), Edge::new(1, 2, 9)]);
        let residual = ResidualGraph::new(&capacities);
        for u in 0..3 {
            for v in 0..3 {
                assert_eq!(residual.residual(u, v), capacities.get(u, v) as u64);
            }
        }
        assert_eq!(residual.outgoing_edges(1).collect::<Vec<_>>(), vec![(2, 9)]);
    }

    #[test]
    fn augmentation_moves_capacity_to_reverse_edge() {
        let capacities = CapacityMatrix::from_edges(
            3,
            &[Edge::new(0, 1, 4), Edge::new(1, 2, 9), Edge::new(2, 1, 2)],
        );
        let mut residual = ResidualGraph::new(&capacities);
        let path = residual.find_augmenting_path(0, 2).unwrap();
        assert_eq!(residual.apply_augmentation(&path), 4);
        assert_eq!(residual.residual(0, 1), 0);
        assert_eq!(residual.residual(1, 0), 4);
        assert_eq!(residual.residual(1, 2), 5);
        assert_eq!(residual.residual(2, 1), 6);
        assert_eq!(residual.find_augmenting_path(0, 2), None);
        assert_eq!(residual.reachable_from(0), vec![true, false, false]);
    }
}
