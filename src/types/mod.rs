pub mod capacity;
pub mod edge;

pub use capacity::{Capacity, CapacityMatrix, Flow, Vertex};
pub use edge::Edge;
