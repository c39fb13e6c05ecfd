//! Loads a graph description, computes the maximum flow between the
//! requested endpoints and writes the result line.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::FlowError;
use crate::graph::{compute_max_flow, MaxFlow};
use crate::io::{read_graph, write_result, LoadedGraph};
use crate::rpc::call_context::CallContext;
use crate::types::Vertex;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolveRequest {
    /// Graph description to load.
    pub input: PathBuf,
    /// Overrides the loader's default source (vertex 1).
    #[serde(default)]
    pub source: Option<Vertex>,
    /// Overrides the loader's default sink (node count - 1).
    #[serde(default)]
    pub sink: Option<Vertex>,
    /// Result file. The result goes to stdout if absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl SolveRequest {
    pub fn new(input: impl Into<PathBuf>) -> SolveRequest {
        SolveRequest {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<SolveRequest, FlowError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn endpoints(&self, graph: &LoadedGraph) -> (Vertex, Vertex) {
        (
            self.source.unwrap_or_else(|| graph.default_source()),
            self.sink.unwrap_or_else(|| graph.default_sink()),
        )
    }

    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit_ms
            .map(|ms| start + Duration::from_millis(ms))
    }
}

/// Runs a request end to end. A failure to write the result is reported as
/// `FlowError::Output`, which still carries the computed value.
pub fn run(request: &SolveRequest, call_context: &CallContext) -> Result<MaxFlow, FlowError> {
    let start = Instant::now();
    let graph = read_graph(&request.input, call_context)?;
    let (source, sink) = request.endpoints(&graph);
    let max_flow = compute_max_flow(
        &graph.capacities,
        source,
        sink,
        request.deadline(start),
        call_context,
    )?;
    call_context.log_message(&format!(
        "Computed in {} ms",
        start.elapsed().as_millis()
    ));
    if let Err(e) = write_to(request.output.as_deref(), &max_flow) {
        return Err(FlowError::Output {
            max_flow: max_flow.value,
            source: e,
        });
    }
    Ok(max_flow)
}

fn write_to(output: Option<&Path>, max_flow: &MaxFlow) -> Result<(), io::Error> {
    match output {
        Some(path) => write_result(
            &mut File::create(path)?,
            max_flow.source,
            max_flow.sink,
            max_flow.value,
        ),
        None => write_result(
            &mut io::stdout().lock(),
            max_flow.source,
            max_flow.sink,
            max_flow.value,
        ),
    }
}
