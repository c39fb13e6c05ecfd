use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use json::JsonValue;
use regex::Regex;

use crate::error::FlowError;
use crate::graph;
use crate::io::{read_graph, read_graph_csv, LoadedGraph};
use crate::rpc::call_context::CallContext;
use crate::types::Vertex;

pub struct JsonRpcRequest {
    pub id: JsonValue,
    pub method: String,
    pub params: JsonValue,
}

struct InputValidationError(String);

impl Error for InputValidationError {}

impl Debug for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

pub fn load_graph(
    graph: &RwLock<Arc<LoadedGraph>>,
    file: &str,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let updated = read_graph(file, call_context)?;
    let summary = graph_summary(&updated);
    *graph.write().unwrap() = Arc::new(updated);
    Ok(summary)
}

pub fn load_edges_csv(
    graph: &RwLock<Arc<LoadedGraph>>,
    file: &str,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let updated = read_graph_csv(file, call_context)?;
    let summary = graph_summary(&updated);
    *graph.write().unwrap() = Arc::new(updated);
    Ok(summary)
}

/// Every call gets its own residual graph, so concurrent calls on the
/// shared capacity matrix do not interfere.
pub fn compute_max_flow(
    request: &JsonRpcRequest,
    graph: &LoadedGraph,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    call_context.log_message(format!("{}", request.params).as_str());
    if graph.capacities.size() == 0 {
        return Err(From::from("No graph loaded yet"));
    }

    let source = match optional_param(&request.params["source"]) {
        Some(value) => validate_and_parse_vertex(&value)?,
        None => graph.default_source(),
    };
    let sink = match optional_param(&request.params["sink"]) {
        Some(value) => validate_and_parse_vertex(&value)?,
        None => graph.default_sink(),
    };
    let deadline = request.params["timeout_ms"]
        .as_u64()
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let max_flow =
        graph::compute_max_flow(&graph.capacities, source, sink, deadline, call_context)?;

    Ok(json::object! {
        maxFlowValue: max_flow.value,
        source: max_flow.source,
        sink: max_flow.sink,
        augmentations: max_flow.augmentations,
        flows: max_flow.flows.into_iter().map(|e| json::object! {
            from: e.from,
            to: e.to,
            value: e.capacity,
        }).collect::<Vec<_>>(),
        minCut: max_flow.min_cut,
    })
}

/// JSON-RPC error code for a failed call: invalid params for rejected
/// vertex ids and endpoints, server error otherwise.
pub fn error_code(error: &(dyn Error + 'static)) -> i64 {
    if error.is::<InputValidationError>() {
        return -32602;
    }
    match error.downcast_ref::<FlowError>() {
        Some(
            FlowError::SourceOutOfRange { .. }
            | FlowError::SinkOutOfRange { .. }
            | FlowError::SourceEqualsSink(_),
        ) => -32602,
        _ => -32000,
    }
}

fn graph_summary(graph: &LoadedGraph) -> JsonValue {
    json::object! {
        nodes: graph.node_count,
        edges: graph.capacities.edge_count(),
        skippedLines: graph.skipped_lines,
    }
}

fn optional_param(value: &JsonValue) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_string())
    }
}

fn vertex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{1,19}$").unwrap())
}

fn validate_and_parse_vertex(value: &str) -> Result<Vertex, Box<dyn Error>> {
    if !vertex_pattern().is_match(value) {
        return Err(Box::new(InputValidationError(format!(
            "Invalid vertex id: {value}"
        ))));
    }
    value.parse::<Vertex>().map_err(|e| {
        Box::new(InputValidationError(format!(
            "Invalid vertex id: {value}. Couldn't parse value: {e}"
        ))) as Box<dyn Error>
    })
}

#[cfg(test)]
mod test {
    use super::{compute_max_flow, validate_and_parse_vertex, JsonRpcRequest};
    use crate::io::LoadedGraph;
    use crate::rpc::call_context::CallContext;
    use crate::types::{CapacityMatrix, Edge};

    fn request(params: json::JsonValue) -> JsonRpcRequest {
        JsonRpcRequest {
            id: 1.into(),
            method: "compute_max_flow".to_string(),
            params,
        }
    }

    fn loaded_graph() -> LoadedGraph {
        LoadedGraph {
            capacities: CapacityMatrix::from_edges(
                4,
                &[Edge::new(1, 2, 3), Edge::new(2, 3, 2), Edge::new(1, 3, 1)],
            ),
            node_count: 3,
            skipped_lines: 0,
        }
    }

    #[test]
    fn vertex_validation() {
        assert_eq!(validate_and_parse_vertex("12").unwrap(), 12);
        assert!(validate_and_parse_vertex("-1").is_err());
        assert!(validate_and_parse_vertex("1.5").is_err());
        assert!(validate_and_parse_vertex("").is_err());
        assert!(validate_and_parse_vertex("99999999999999999999").is_err());
    }

    #[test]
    fn explicit_endpoints() {
        let result = compute_max_flow(
            &request(json::object! { source: 1, sink: "3" }),
            &loaded_graph(),
            &CallContext::default(),
        )
        .unwrap();
        assert_eq!(result["maxFlowValue"].as_u64(), Some(3));
        assert_eq!(result["flows"].len(), 3);
        assert_eq!(result["minCut"][0].as_usize(), Some(1));
    }

    #[test]
    fn default_endpoints() {
        // Loader convention: source 1, sink node_count - 1 = 2.
        let result = compute_max_flow(
            &request(json::object! {}),
            &loaded_graph(),
            &CallContext::default(),
        )
        .unwrap();
        assert_eq!(result["sink"].as_usize(), Some(2));
        assert_eq!(result["maxFlowValue"].as_u64(), Some(3));
    }

    #[test]
    fn rejects_invalid_requests() {
        let context = CallContext::default();
        assert!(compute_max_flow(
            &request(json::object! { source: 1, sink: 9 }),
            &loaded_graph(),
            &context
        )
        .is_err());
        assert!(compute_max_flow(
            &request(json::object! { source: "x", sink: 3 }),
            &loaded_graph(),
            &context
        )
        .is_err());
        assert!(compute_max_flow(&request(json::object! {}), &LoadedGraph::default(), &context)
            .is_err());
    }
}
