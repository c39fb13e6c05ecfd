use std::io;
use std::net::TcpListener;
use std::ops::Deref;
use std::sync::{mpsc, Arc, Mutex, RwLock};
use std::thread;

use crate::io::LoadedGraph;
use crate::rpc::rpc_handler::handle_connection;

/// Accepts JSON-RPC connections and hands them to `threads` workers through
/// a queue of `queue_size` pending sockets. Connections arriving while the
/// queue is full are dropped.
pub fn start_server(listen_at: &str, queue_size: usize, threads: u64) -> Result<(), io::Error> {
    let graph: Arc<RwLock<Arc<LoadedGraph>>> =
        Arc::new(RwLock::new(Arc::new(LoadedGraph::default())));

    let (sender, receiver) = mpsc::sync_channel(queue_size);
    let protected_receiver = Arc::new(Mutex::new(receiver));
    for _ in 0..threads {
        let rec = protected_receiver.clone();
        let g = graph.clone();
        thread::spawn(move || loop {
            let socket = match rec.lock().unwrap().recv() {
                Ok(socket) => socket,
                Err(_) => return,
            };
            if let Err(e) = handle_connection(g.deref(), socket) {
                log::error!("Error handling connection: {e}");
            }
        });
    }
    let listener = TcpListener::bind(listen_at)?;
    log::info!("Listening on {listen_at}");
    loop {
        match listener.accept() {
            Ok((socket, _)) => match sender.try_send(socket) {
                Ok(()) => {}
                Err(e) => log::warn!("Queue full: {e}"),
            },
            Err(e) => log::error!("Error accepting connection: {e}"),
        }
    }
}
