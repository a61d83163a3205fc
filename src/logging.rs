// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Diagnostic tracing for the `puzzle` binary.
//!
//! The kernels emit `tracing` events (search statistics at `debug`, rewrite
//! steps at `trace`); answers go to stdout regardless of the filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Output goes to stderr in compact
/// format.
///
/// # Example
/// ```bash
/// RUST_LOG=puzzle_search=debug puzzle route input.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
