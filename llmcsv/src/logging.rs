//! Diagnostic tracing for the CLI.
//!
//! - **Tracing (this module)**: diagnostics via `RUST_LOG`, written to stderr so
//!   they never mix with the transcript on stdout.
//! - **Transcript (`core::transcript`)**: the user-facing summary printed on
//!   stdout. Always printed, unaffected by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, which keeps per-row runtime
/// failures visible without any configuration.
///
/// # Example
/// ```bash
/// RUST_LOG=llmcsv=debug llmcsv -f data.csv -p "Translate:"
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
