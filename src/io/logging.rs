//! Structured logging setup for the command-line entry point

use tracing_subscriber::EnvFilter;

/// Log level implied by the verbosity flags
pub const fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flags. Returns `false` if a
/// global subscriber was already installed.
pub fn init(verbosity: u8, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pixelbloom={}", level_for(verbosity, quiet))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
