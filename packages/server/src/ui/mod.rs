//! HTTP/SSE/WebSocket transport.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use signal::{Shutdown, ShutdownTrigger, shutdown_channel};
