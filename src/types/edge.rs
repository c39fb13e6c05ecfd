use std::fmt::{Display, Formatter};

use crate::types::{Capacity, Vertex};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub capacity: Capacity,
}

impl Edge {
    pub fn new(from: Vertex, to: Vertex, capacity: Capacity) -> Edge {
        Edge { from, to, capacity }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.capacity)
    }
}
