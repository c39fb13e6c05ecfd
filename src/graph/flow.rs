use std::time::Instant;

use crate::error::FlowError;
use crate::graph::extract_flows::{cut_capacity, cut_vertices, extract_flows};
use crate::graph::residual::ResidualGraph;
use crate::rpc::call_context::CallContext;
use crate::types::{CapacityMatrix, Edge, Flow, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Running,
    Done,
}

/// Result of a completed max-flow computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxFlow {
    pub source: Vertex,
    pub sink: Vertex,
    pub value: Flow,
    /// Number of augmenting paths that were applied.
    pub augmentations: usize,
    /// Edges carrying flow, with the amount in `capacity`.
    pub flows: Vec<Edge>,
    /// Source side of a minimum cut.
    pub min_cut: Vec<Vertex>,
}

/// Edmonds-Karp: repeatedly augments along a shortest residual path until
/// source and sink are separated.
pub struct MaxFlowSolver<'a> {
    capacities: &'a CapacityMatrix,
    residual: ResidualGraph,
    source: Vertex,
    sink: Vertex,
    state: SolverState,
    flow: Flow,
    augmentations: usize,
}

impl<'a> MaxFlowSolver<'a> {
    pub fn new(
        capacities: &'a CapacityMatrix,
        source: Vertex,
        sink: Vertex,
    ) -> Result<Self, FlowError> {
        validate_endpoints(capacities, source, sink)?;
        Ok(MaxFlowSolver {
            capacities,
            residual: ResidualGraph::new(capacities),
            source,
            sink,
            state: SolverState::Running,
            flow: 0,
            augmentations: 0,
        })
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Flow accumulated so far. Only maximal once the state is `Done`.
    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn residual(&self) -> &ResidualGraph {
        &self.residual
    }

    /// Runs one iteration: finds and applies a single augmenting path.
    pub fn step(&mut self) -> SolverState {
        if self.state == SolverState::Done {
            return self.state;
        }
        match self.residual.find_augmenting_path(self.source, self.sink) {
            Some(path) => {
                let bottleneck = self.residual.apply_augmentation(&path);
                log::trace!("Augmented {bottleneck} along {:?}", path.vertices());
                self.flow += bottleneck;
                self.augmentations += 1;
            }
            None => self.state = SolverState::Done,
        }
        self.state
    }

    /// Steps until done. The deadline is checked between iterations.
    ///
    /// The check runs after each augmentation, before the search that would
    /// confirm termination, so a run whose last augmentation finishes as the
    /// deadline passes reports `DeadlineExceeded` even if its flow is maximal.
    pub fn run(
        mut self,
        deadline: Option<Instant>,
        call_context: &CallContext,
    ) -> Result<MaxFlow, FlowError> {
        while self.step() == SolverState::Running {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    call_context.log_message(&format!(
                        "Deadline exceeded after {} augmentations, partial flow {}",
                        self.augmentations, self.flow
                    ));
                    return Err(FlowError::DeadlineExceeded {
                        partial_flow: self.flow,
                        augmentations: self.augmentations,
                    });
                }
            }
        }
        Ok(self.into_result(call_context))
    }

    fn into_result(self, call_context: &CallContext) -> MaxFlow {
        let side = self.residual.reachable_from(self.source);
        debug_assert_eq!(cut_capacity(self.capacities, &side), self.flow);
        call_context.log_message(&format!(
            "Max flow {} -> {}: {} ({} augmentations)",
            self.source, self.sink, self.flow, self.augmentations
        ));
        MaxFlow {
            source: self.source,
            sink: self.sink,
            value: self.flow,
            augmentations: self.augmentations,
            flows: extract_flows(self.capacities, &self.residual),
            min_cut: cut_vertices(&side),
        }
    }
}

pub fn compute_max_flow(
    capacities: &CapacityMatrix,
    source: Vertex,
    sink: Vertex,
    deadline: Option<Instant>,
    call_context: &CallContext,
) -> Result<MaxFlow, FlowError> {
    MaxFlowSolver::new(capacities, source, sink)?.run(deadline, call_context)
}

pub fn validate_endpoints(
    capacities: &CapacityMatrix,
    source: Vertex,
    sink: Vertex,
) -> Result<(), FlowError> {
    let size = capacities.size();
    if !capacities.contains(source) {
        return Err(FlowError::SourceOutOfRange {
            vertex: source,
            size,
        });
    }
    if !capacities.contains(sink) {
        return Err(FlowError::SinkOutOfRange { vertex: sink, size });
    }
    if source == sink {
        return Err(FlowError::SourceEqualsSink(source));
    }
    Ok(())
}
