mod augmenting_path;
mod extract_flows;
mod flow;
mod residual;
mod test;

pub use crate::graph::augmenting_path::AugmentingPath;
pub use crate::graph::extract_flows::{cut_capacity, cut_vertices, extract_flows};
pub use crate::graph::flow::{
    compute_max_flow, validate_endpoints, MaxFlow, MaxFlowSolver, SolverState,
};
pub use crate::graph::residual::ResidualGraph;
