#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the generator.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor the caller names one.
pub const DEFAULT_LEVEL: &str = "info";

/// Build the filter: `RUST_LOG` wins over `level`.
pub fn filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LEVEL)))
}

/// Install a stderr `fmt` subscriber. A second call keeps the first subscriber.
pub fn init(level: Option<&str>) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter(level));

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}
