//! Diagnostic logging.
//!
//! rlog reports its own troubles (drops, evictions, flush failures, use
//! before start) through `tracing`, never through itself, so a stalled
//! module cannot feed back into the channels it is stalling.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber for diagnostics.
///
/// The filter comes from `RUST_LOG` if set, else `default_filter`.
/// Returns false if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
