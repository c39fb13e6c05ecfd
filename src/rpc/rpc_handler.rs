use std::error::Error;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::{Arc, RwLock};

use json::JsonValue;

use crate::io::LoadedGraph;
use crate::rpc::call_context::CallContext;
use crate::rpc::rpc_functions::{
    compute_max_flow, error_code, load_edges_csv, load_graph, JsonRpcRequest,
};

pub fn handle_connection(
    graph: &RwLock<Arc<LoadedGraph>>,
    mut socket: TcpStream,
) -> Result<(), Box<dyn Error>> {
    let request = read_request(&mut socket)?;
    let client_ip = socket.peer_addr()?.to_string();

    let call_context = CallContext::new(&client_ip, &request.id, &request.method);
    let response = dispatch(graph, request, &call_context);
    socket.write_all(jsonrpc_response(response).as_bytes())?;
    Ok(())
}

/// Runs a request and returns the serialized JSON-RPC response.
pub fn dispatch(
    graph: &RwLock<Arc<LoadedGraph>>,
    request: JsonRpcRequest,
    call_context: &CallContext,
) -> String {
    let result = match request.method.as_str() {
        "load_graph" => load_graph(graph, &request.params["file"].to_string(), call_context)
            .map_err(|e| (-32000, format!("Error loading graph: {e}"))),
        "load_edges_csv" => {
            load_edges_csv(graph, &request.params["file"].to_string(), call_context)
                .map_err(|e| (-32000, format!("Error loading edges: {e}")))
        }
        "compute_max_flow" => {
            let g = graph.read().unwrap().clone();
            compute_max_flow(&request, g.as_ref(), call_context).map_err(|e| {
                (
                    error_code(&*e),
                    format!("Error computing max flow: {e}"),
                )
            })
        }
        _ => Err((-32601, "Method not found".to_string())),
    };
    if let Err((code, message)) = &result {
        call_context.log_warning(&format!("Error (code: {code}): {message}"));
    }
    let response = jsonrpc_serialize_response(request.id, result);
    call_context.log_message(&format!("Result: {response}"));
    response
}

fn read_payload(socket: &mut TcpStream) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut reader = BufReader::new(socket);
    let mut length = 0;
    for result in reader.by_ref().lines() {
        let l = result?;
        if l.is_empty() {
            break;
        }

        let header = "content-length: ";
        if l.to_lowercase().starts_with(header) {
            length = l[header.len()..].parse::<usize>()?;
        }
    }
    let mut payload = vec![0u8; length];

    reader.read_exact(payload.as_mut_slice())?;
    Ok(payload)
}

fn read_request(socket: &mut TcpStream) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let payload = read_payload(socket)?;
    parse_request(&String::from_utf8(payload)?)
}

pub fn parse_request(payload: &str) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let mut request = json::parse(payload)?;
    let id = request["id"].take();
    let params = request["params"].take();
    match request["method"].as_str() {
        Some(method) => Ok(JsonRpcRequest {
            id,
            method: method.to_string(),
            params,
        }),
        _ => Err(From::from(format!("Invalid JSON-RPC request: {request}"))),
    }
}

fn jsonrpc_serialize_response(id: JsonValue, result: Result<JsonValue, (i64, String)>) -> String {
    let mut response = json::object! {
        jsonrpc: "2.0",
        id: id,
    };
    // Inserting into a freshly created object cannot fail.
    let _ = match result {
        Ok(result) => response.insert("result", result),
        Err((code, message)) => response.insert(
            "error",
            json::object! {
                code: code,
                message: message,
            },
        ),
    };
    response.dump()
}

fn jsonrpc_response(json_payload: String) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
        json_payload.len(),
        json_payload
    )
}
