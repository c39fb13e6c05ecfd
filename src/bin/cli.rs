use std::env;
use std::process::ExitCode;

use flowfinder::rpc::call_context::CallContext;
use flowfinder::solve::{self, SolveRequest};
use flowfinder::FlowError;

fn usage() {
    println!("Usage: cli <graph.tntp> [<source> <sink>] [--output <file>] [--time-limit <ms>]");
    println!("Usage: cli --config <request.json>");
    println!("Vertex ids are 1-based. Without <source> <sink>, the source is vertex 1");
    println!("and the sink is vertex <NUMBER OF NODES> - 1.");
}

fn parse_args(args: &[String]) -> Option<SolveRequest> {
    if args.first().map(String::as_str) == Some("--config") {
        let path = args.get(1)?;
        return match SolveRequest::from_json_file(path) {
            Ok(request) => Some(request),
            Err(e) => {
                println!("Error reading configuration \"{path}\": {e}");
                None
            }
        };
    }

    let mut request = SolveRequest::new(args.first()?);
    let mut positional = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--output" => request.output = Some(rest.next()?.into()),
            "--time-limit" => request.time_limit_ms = Some(rest.next()?.parse().ok()?),
            _ => positional.push(arg.parse().ok()?),
        }
    }
    match positional[..] {
        [] => {}
        [source, sink] => {
            request.source = Some(source);
            request.sink = Some(sink);
        }
        _ => return None,
    }
    Some(request)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = env::args().skip(1).collect::<Vec<_>>();
    let Some(request) = parse_args(&args) else {
        usage();
        return ExitCode::FAILURE;
    };

    println!("Computing max flow using {}", request.input.display());
    match solve::run(&request, &CallContext::default()) {
        Ok(max_flow) => {
            if let Some(output) = &request.output {
                println!(
                    "Found max flow {} in {} augmentations, written to {}",
                    max_flow.value,
                    max_flow.augmentations,
                    output.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e @ FlowError::Output { .. }) => {
            if let Some(value) = e.computed_flow() {
                println!("Found max flow: {value}");
            }
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
