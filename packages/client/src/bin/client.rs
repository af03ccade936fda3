//! Terminal chat client with reconnection support.
//!
//! Logs in to a channel, prints channel events and sends each input line as a
//! message. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval). A rejected login exits with a non-zero status.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chanrelay-client -- --nick alice
//! cargo run --bin chanrelay-client -- -n bob --channel rust --url ws://127.0.0.1:8090/ws
//! ```

use clap::Parser;

use chanrelay_client::{ClientConfig, run_client};
use chanrelay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chanrelay-client")]
#[command(about = "Terminal client for the Chanrelay chat relay", long_about = None)]
struct Args {
    /// Nickname to log in with (unique per channel)
    #[arg(short = 'n', long)]
    nick: String,

    /// Channel to join (defaults to "main" on the server)
    #[arg(short = 'c', long)]
    channel: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8090/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("chanrelay_client", env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig {
        url: args.url,
        nick: args.nick,
        channel: args.channel,
    };
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
