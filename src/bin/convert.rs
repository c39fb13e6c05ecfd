use std::env;
use std::process::ExitCode;

use flowfinder::io::{read_graph, read_graph_csv, write_edges_csv, write_graph};
use flowfinder::rpc::call_context::CallContext;

fn main() -> ExitCode {
    env_logger::init();
    let args = env::args().collect::<Vec<_>>();
    let operation = args.get(1).map(String::as_str).filter(|op| {
        matches!(*op, "--graph-to-edges-csv" | "--edges-csv-to-graph")
    });
    let (Some(operation), [_, _, input, output]) = (operation, &args[..]) else {
        println!("Usage: convert --graph-to-edges-csv <graph.tntp> <edges.csv>");
        println!("Usage: convert --edges-csv-to-graph <edges.csv> <graph.tntp>");
        return ExitCode::FAILURE;
    };

    let context = CallContext::default();
    let result = match operation {
        "--graph-to-edges-csv" => read_graph(input, &context).and_then(|graph| {
            println!("Imported {}.", graph.capacities);
            Ok(write_edges_csv(&graph.capacities.edges(), output)?)
        }),
        _ => read_graph_csv(input, &context).and_then(|graph| {
            println!("Imported {}.", graph.capacities);
            Ok(write_graph(&graph, output)?)
        }),
    };
    match result {
        Ok(()) => {
            println!("Export done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
