use std::env;
use std::process::ExitCode;

use flowfinder::server;

fn main() -> ExitCode {
    env_logger::init();
    let listen_at = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let queue_size = env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let threads = env::args()
        .nth(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);
    match server::start_server(&listen_at, queue_size, threads) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Could not start server on {listen_at}: {e}");
            ExitCode::FAILURE
        }
    }
}
