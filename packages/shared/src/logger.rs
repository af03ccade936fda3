//! Logging setup for the Chanrelay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crate of the binary as well as the binary
/// itself. `RUST_LOG` takes precedence when it is set.
///
/// # Arguments
///
/// * `crate_name` - Name of the library crate that emits most events (e.g. "chanrelay_server")
/// * `binary_name` - The name of the binary (e.g. "chanrelay-server")
/// * `default_level` - The default log level (e.g. "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use chanrelay_shared::logger::setup_logger;
///
/// setup_logger("chanrelay_server", "chanrelay-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Binary targets use underscores in their module path, so dashes are replaced.
pub fn default_filter(crate_name: &str, binary_name: &str, default_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        default_level,
        binary_name.replace('-', "_"),
        default_level,
        default_level
    )
}
