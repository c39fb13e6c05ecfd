pub mod error;
pub mod graph;
pub mod io;
pub mod rpc;
pub mod server;
pub mod solve;
pub mod types;

pub use crate::error::FlowError;
