// Server module entry point
// Listener construction and the accept loop

pub mod connection;
pub mod listener;

pub use listener::create_listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::logger;

/// Accept connections forever.
///
/// There is no shutdown path; the process ends only by signal or crash.
/// Accept errors are logged and the loop keeps going.
pub async fn run(listener: TcpListener, config: Arc<ServerConfig>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, Arc::clone(&config));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
