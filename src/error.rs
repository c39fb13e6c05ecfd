//! Error taxonomy of loading, solving and reporting.

use std::io;

use thiserror::Error;

use crate::types::{Flow, Vertex};

#[derive(Debug, Error)]
pub enum FlowError {
    /// The graph description could not be read.
    #[error("error reading graph description: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("graph description has no <NUMBER OF NODES> header")]
    MissingNodeCount,
    #[error("invalid node count: {0:?}")]
    InvalidNodeCount(String),
    #[error("source vertex {vertex} is outside of [0, {size})")]
    SourceOutOfRange { vertex: Vertex, size: usize },
    #[error("sink vertex {vertex} is outside of [0, {size})")]
    SinkOutOfRange { vertex: Vertex, size: usize },
    #[error("source and sink are the same vertex ({0})")]
    SourceEqualsSink(Vertex),
    /// The time limit ran out before the residual graph separated source
    /// and sink. `partial_flow` is a lower bound, not the maximum.
    #[error(
        "time limit exceeded after {augmentations} augmentations \
         (partial flow {partial_flow} is not maximal)"
    )]
    DeadlineExceeded {
        partial_flow: Flow,
        augmentations: usize,
    },
    /// Writing the result failed. The computed value is still available.
    #[error("maximum flow {max_flow} computed, but writing the result failed: {source}")]
    Output {
        max_flow: Flow,
        #[source]
        source: io::Error,
    },
}

impl FlowError {
    /// The maximum flow value, if it was computed before the error occurred.
    pub fn computed_flow(&self) -> Option<Flow> {
        match self {
            FlowError::Output { max_flow, .. } => Some(*max_flow),
            _ => None,
        }
    }
}
