use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::FlowError;
use crate::rpc::call_context::CallContext;
use crate::types::{Capacity, CapacityMatrix, Edge, Flow, Vertex};

pub const NODE_COUNT_MARKER: &str = "<NUMBER OF NODES>";

/// A capacity matrix loaded from a graph description.
///
/// Vertex ids in the description are 1-based, so the matrix has
/// `node_count + 1` slots and slot 0 stays unused.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadedGraph {
    pub capacities: CapacityMatrix,
    pub node_count: usize,
    /// Body lines that did not describe an edge.
    pub skipped_lines: usize,
}

impl LoadedGraph {
    /// The loader always uses vertex 1 as the source.
    pub fn default_source(&self) -> Vertex {
        1
    }

    /// The loader uses `node_count - 1` as the sink, the second to last
    /// allocated slot. This is a fixed convention of the input format.
    pub fn default_sink(&self) -> Vertex {
        self.node_count.saturating_sub(1)
    }
}

pub fn read_graph(
    path: impl AsRef<Path>,
    call_context: &CallContext,
) -> Result<LoadedGraph, FlowError> {
    let path = path.as_ref();
    call_context.log_message(&format!("Reading graph from {}", path.display()));
    let f = BufReader::new(File::open(path)?);
    let graph = parse_graph(f, call_context)?;
    call_context.log_message(&format!(
        "Read {} ({} lines skipped)",
        graph.capacities, graph.skipped_lines
    ));
    Ok(graph)
}

/// Parses a graph description: header lines up to and including the
/// `<NUMBER OF NODES>` line, then one `u v capacity ...` edge per line.
pub fn parse_graph(
    input: impl BufRead,
    call_context: &CallContext,
) -> Result<LoadedGraph, FlowError> {
    let mut graph: Option<LoadedGraph> = None;
    for line in input.lines() {
        let line = line?;
        match graph.as_mut() {
            None => {
                if let Some(node_count) = parse_node_count(&line)? {
                    let capacities = CapacityMatrix::try_for_nodes(node_count)
                        .ok_or_else(|| FlowError::InvalidNodeCount(node_count.to_string()))?;
                    graph = Some(LoadedGraph {
                        capacities,
                        node_count,
                        skipped_lines: 0,
                    });
                }
            }
            Some(graph) => {
                if line.trim().is_empty() {
                    continue;
                }
                let recorded = match parse_edge(&line) {
                    Some(edge) => graph.capacities.set(edge.from, edge.to, edge.capacity),
                    None => false,
                };
                if !recorded {
                    call_context.log_debug(&format!("Skipping invalid line: {line}"));
                    graph.skipped_lines += 1;
                }
            }
        }
    }
    graph.ok_or(FlowError::MissingNodeCount)
}

fn node_count_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<NUMBER OF NODES>(.*)$").unwrap())
}

fn parse_node_count(line: &str) -> Result<Option<usize>, FlowError> {
    match node_count_pattern().captures(line) {
        Some(captures) => {
            let value = captures[1].trim();
            value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| FlowError::InvalidNodeCount(value.to_string()))
        }
        None => Ok(None),
    }
}

/// Parses `u v capacity` from the first three whitespace separated tokens.
/// The capacity is a real number truncated towards zero.
pub fn parse_edge(line: &str) -> Option<Edge> {
    let mut tokens = line.split_whitespace();
    let from = tokens.next()?.parse::<Vertex>().ok()?;
    let to = tokens.next()?.parse::<Vertex>().ok()?;
    let capacity = parse_capacity(tokens.next()?)?;
    Some(Edge { from, to, capacity })
}

fn parse_capacity(token: &str) -> Option<Capacity> {
    let value = token.parse::<f64>().ok()?.trunc();
    if value.is_finite() && value >= 0.0 && value <= Capacity::MAX as f64 {
        Some(value as Capacity)
    } else {
        None
    }
}

/// Writes a graph description that `read_graph` loads back unchanged.
pub fn write_graph(graph: &LoadedGraph, path: impl AsRef<Path>) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{NODE_COUNT_MARKER} {}", graph.node_count)?;
    writeln!(file, "<END OF METADATA>")?;
    writeln!(file)?;
    for Edge { from, to, capacity } in graph.capacities.edges() {
        writeln!(file, "{from}\t{to}\t{capacity}")?;
    }
    Ok(())
}

pub fn read_edges_csv(path: impl AsRef<Path>) -> Result<Vec<Edge>, io::Error> {
    let mut edges = Vec::new();
    let f = BufReader::new(File::open(path)?);
    for line in f.lines() {
        let line = line?;
        match &line.split(',').collect::<Vec<_>>()[..] {
            [] | [""] => continue,
            [from, to, capacity] => {
                let edge = (|| {
                    Some(Edge {
                        from: unescape(from).parse().ok()?,
                        to: unescape(to).parse().ok()?,
                        capacity: unescape(capacity).parse().ok()?,
                    })
                })();
                match edge {
                    Some(edge) => edges.push(edge),
                    None => return Err(invalid_csv_line(&line)),
                }
            }
            _ => return Err(invalid_csv_line(&line)),
        }
    }
    Ok(edges)
}

/// Builds a capacity matrix from a CSV edge list. The node count is the
/// largest vertex id, keeping the 1-based convention of graph descriptions.
pub fn read_graph_csv(
    path: impl AsRef<Path>,
    call_context: &CallContext,
) -> Result<LoadedGraph, FlowError> {
    let edges = read_edges_csv(path)?;
    let node_count = edges
        .iter()
        .map(|e| e.from.max(e.to))
        .max()
        .unwrap_or_default();
    let mut capacities = CapacityMatrix::try_for_nodes(node_count).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Vertex id {node_count} is too large"),
        )
    })?;
    for edge in &edges {
        capacities.set(edge.from, edge.to, edge.capacity);
    }
    call_context.log_message(&format!("Read {capacities} from csv"));
    Ok(LoadedGraph {
        capacities,
        node_count,
        skipped_lines: 0,
    })
}

pub fn write_edges_csv(edges: &[Edge], path: impl AsRef<Path>) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    let mut sorted_edges = edges.to_vec();
    sorted_edges.sort();
    for Edge { from, to, capacity } in sorted_edges {
        writeln!(file, "{from},{to},{capacity}")?;
    }
    Ok(())
}

/// Writes the single result line.
pub fn write_result(
    out: &mut impl Write,
    source: Vertex,
    sink: Vertex,
    max_flow: Flow,
) -> Result<(), io::Error> {
    writeln!(out, "Maximum flow from vertex {source} to vertex {sink}: {max_flow}")?;
    out.flush()
}

fn invalid_csv_line(line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Expected from,to,capacity, but got {line}"),
    )
}

fn unescape(input: &str) -> &str {
    let input = input.trim();
    match input.chars().next() {
        Some(quote @ ('"' | '\'')) if input.len() >= 2 && input.ends_with(quote) => {
            &input[1..input.len() - 1]
        }
        _ => input,
    }
}
