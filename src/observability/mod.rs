//! Observability for the logger itself.
//!
//! # Data Flow
//! ```text
//! bus / flush / lifecycle produce:
//!     → logging.rs (tracing diagnostics on stderr)
//!     → metrics.rs (drop, eviction, filter and flush counters)
//! ```
//!
//! # Design Decisions
//! - Diagnostics never go through rlog's own channels
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
