use std::sync::Arc;

use no_cache_server::config::ServerConfig;
use no_cache_server::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the root directory before anything else; a missing
    // public_html is a startup error, not a per-request 404.
    let config = ServerConfig::resolve()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let listener = server::create_listener(config.socket_addr())?;

    logger::log_server_start(config.port);

    server::run(listener, Arc::new(config)).await;
    Ok(())
}
