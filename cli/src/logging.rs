//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Install the global `tracing` subscriber.
///
/// `verbosity` is the number of `-v` flags: 0 shows errors only (plus the
/// Playwright driver silenced), 1 shows info, 2+ shows debug. `RUST_LOG`
/// overrides all of it.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "error,playwright_rs=off",
        1 => "info,playwright_rs=warn",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

    // A second init (tests calling `run` twice) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .try_init();
}
