//! Multi-channel WebSocket chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chanrelay-server
//! cargo run --bin chanrelay-server -- --host 127.0.0.1 --port 3000 --cache-size 50
//! ```

use chanrelay_server::{app, config::ServerConfig};
use chanrelay_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        "chanrelay_server",
        env!("CARGO_BIN_NAME"),
        &config.log_level,
    );
    tracing::info!(
        "Starting with cache_size={}, max_message_size={}MB",
        config.cache_size,
        config.max_message_size_mb
    );

    let (server, dispatcher_task) = app::build(&config);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    dispatcher_task.abort();
}
