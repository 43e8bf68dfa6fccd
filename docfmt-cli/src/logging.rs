//! Log output for the command line
//!
//!     Events go to stderr so they never mix with diffs or transform output on stdout.
//!     `RUST_LOG` wins over the `-v` count when set.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Default filter for a given number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // Already installed (tests, embedding); keep the existing one
    let _ = tracing::subscriber::set_global_default(subscriber);
}
