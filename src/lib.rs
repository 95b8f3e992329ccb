//! rlog: an asynchronous, module-based logging library.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller thread                                     module threads
//!  ┌──────────────────────────────────┐
//!  │ Logger::log / info!(..)          │
//!  │   → filter (severity, tag)       │      ┌──────────────────────────┐
//!  │   → LogRecord::build             │  ┌──▶│ channel ─▶ Module::run   │
//!  │     (header, call site, trace)   │  │   └──────────────────────────┘
//!  │   → Bus::broadcast ──────────────┼──┤   ┌──────────────────────────┐
//!  │     (bounded, evict-oldest)      │  └──▶│ channel ─▶ Module::run   │
//!  └──────────────────────────────────┘      └──────────────────────────┘
//!
//!  Logger::flush ─▶ one flush request per module ─▶ ack or timeout
//! ```
//!
//! The caller never waits on I/O: each module owns a bounded channel and a
//! full channel loses its oldest record. rlog's own diagnostics go to
//! `tracing` and `metrics`, never back through the modules.

#[macro_use]
mod macros;

pub mod bus;
pub mod config;
pub mod filter;
pub mod lifecycle;
pub mod module;
pub mod observability;
pub mod record;

pub use bus::{FlushOutcome, FlushReport, FlushRequest};
pub use config::{RlogConfig, TagFilter};
pub use lifecycle::{Logger, LoggerBuilder};
pub use module::{Module, ModuleChannels, ModuleEvent, WriterModule};
pub use record::{CallSite, LogRecord, Severity};
