//! Distribution bus.
//!
//! # Data Flow
//! ```text
//! broadcast(Arc<LogRecord>):
//!     for each binding → channel.rs push (try_send, evict oldest, retry ≤ 3)
//!
//! flush(timeout):
//!     for each binding, sequentially → flush.rs request/ack protocol
//! ```
//!
//! # Design Decisions
//! - One bounded channel per module; a stalled module only loses its own records
//! - Bindings are created once at start and never change afterwards
//! - Flush is best-effort: per-module outcomes, no aggregate failure

pub mod channel;
pub mod flush;

use std::sync::Arc;
use std::time::Duration;

use crate::module::ModuleChannels;
use crate::record::LogRecord;

pub use channel::{non_blocking_read, Delivery, MessageChannel, MAX_PUSH_ATTEMPTS};
pub use flush::{FlushChannel, FlushOutcome, FlushRequest};

/// One module's channel pair, producer side.
#[derive(Debug, Clone)]
pub struct Binding {
    messages: MessageChannel,
    flushes: FlushChannel,
}

impl Binding {
    /// Create a fresh channel pair for `module`. The returned channels go to
    /// the module; the binding stays with the bus.
    pub fn new(module: &str, capacity: usize) -> (Self, ModuleChannels) {
        let (messages, records) = MessageChannel::new(module, capacity);
        let (flushes, flush_rx) = FlushChannel::new(module);
        (Self { messages, flushes }, ModuleChannels::new(records, flush_rx))
    }

    pub fn module(&self) -> &str {
        self.messages.module()
    }

    pub fn messages(&self) -> &MessageChannel {
        &self.messages
    }

    pub fn flushes(&self) -> &FlushChannel {
        &self.flushes
    }
}

/// Per-module flush results, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub outcomes: Vec<(String, FlushOutcome)>,
}

impl FlushReport {
    /// True if every module acknowledged (vacuously true with no modules).
    pub fn all_acknowledged(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_success())
    }

    pub fn acknowledged(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_success())
            .count()
    }

    pub fn outcome(&self, module: &str) -> Option<FlushOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == module)
            .map(|(_, outcome)| *outcome)
    }
}

/// The frozen set of bindings.
#[derive(Debug, Default)]
pub struct Bus {
    bindings: Vec<Binding>,
}

impl Bus {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Deliver `record` to every module independently. Never blocks.
    pub fn broadcast(&self, record: Arc<LogRecord>) {
        for binding in &self.bindings {
            binding.messages.push(Arc::clone(&record));
        }
    }

    /// Flush every module in turn, blocking at most `timeout` for each.
    pub fn flush(&self, timeout: Duration) -> FlushReport {
        let mut report = FlushReport::default();
        for binding in &self.bindings {
            let outcome = binding.flushes.flush(timeout);
            report.outcomes.push((binding.module().to_string(), outcome));
        }
        report
    }
}
