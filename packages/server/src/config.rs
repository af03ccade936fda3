//! Configuration for the chat relay server.
//!
//! Every option is a CLI flag with an environment variable fallback:
//!
//! - `HOST`                    (default: "0.0.0.0")
//! - `PORT`                    (default: "8090")
//! - `CACHE_SIZE`              (default: "0")
//! - `MAX_HTTP_BUFFER_SIZE_MB` (default: "1")
//! - `PING_INTERVAL_MS`        (default: "25000")
//! - `IDLE_TIMEOUT_MS`         (default: "60000")

use std::time::Duration;

use clap::Parser;

use crate::{domain::BacklogCapacity, ui::ConnectionSettings};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Server configuration.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "chanrelay-server")]
#[command(about = "Multi-channel WebSocket chat relay", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8090)]
    pub port: u16,

    /// Number of messages kept per channel and replayed to new members
    #[arg(long, env = "CACHE_SIZE", default_value_t = 0)]
    pub cache_size: usize,

    /// Largest accepted inbound frame, in megabytes
    #[arg(long, env = "MAX_HTTP_BUFFER_SIZE_MB", default_value_t = 1)]
    pub max_message_size_mb: usize,

    /// Interval between server pings on each WebSocket connection, in milliseconds
    #[arg(
        long,
        env = "PING_INTERVAL_MS",
        default_value_t = 25_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ping_interval_ms: u64,

    /// Close a connection after this long without any inbound frame, in milliseconds
    #[arg(
        long,
        env = "IDLE_TIMEOUT_MS",
        default_value_t = 60_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub idle_timeout_ms: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn backlog_capacity(&self) -> BacklogCapacity {
        BacklogCapacity::new(self.cache_size)
    }

    pub fn max_message_size_bytes(&self) -> usize {
        self.max_message_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            max_message_size: self.max_message_size_bytes(),
            ping_interval: Duration::from_millis(self.ping_interval_ms),
            idle_timeout: Duration::from_millis(self.idle_timeout_ms),
        }
    }
}
