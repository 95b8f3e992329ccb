//! Bounded per-module message channel with evict-and-retry delivery.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

use crate::observability::metrics;
use crate::record::LogRecord;

/// Total send attempts for one record before it is dropped.
pub const MAX_PUSH_ATTEMPTS: usize = 3;

/// Outcome of pushing one record into one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Queued; `evicted` older records were discarded to make room.
    Queued { evicted: usize },
    /// Still full after [`MAX_PUSH_ATTEMPTS`]; the new record was discarded.
    Dropped { evicted: usize },
}

/// Producer side of a module's message channel.
///
/// Holds a receiver clone used only to evict the oldest record when the
/// channel is full; the module's own receiver is the only consumer.
#[derive(Debug, Clone)]
pub struct MessageChannel {
    module: String,
    tx: Sender<Arc<LogRecord>>,
    evict: Receiver<Arc<LogRecord>>,
}

impl MessageChannel {
    /// Create a channel of `capacity` records. Returns the producer side and
    /// the receiver handed to the module.
    pub fn new(module: impl Into<String>, capacity: usize) -> (Self, Receiver<Arc<LogRecord>>) {
        let (tx, rx) = bounded(capacity.max(1));
        let channel = Self {
            module: module.into(),
            tx,
            evict: rx.clone(),
        };
        (channel, rx)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Number of records currently queued.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(0)
    }

    /// Push without blocking. When full, evict the oldest record and retry,
    /// at most [`MAX_PUSH_ATTEMPTS`] attempts in total.
    pub fn push(&self, record: Arc<LogRecord>) -> Delivery {
        let mut record = record;
        let mut evicted = 0;

        for _ in 0..MAX_PUSH_ATTEMPTS {
            match self.tx.try_send(record) {
                Ok(()) => return Delivery::Queued { evicted },
                Err(TrySendError::Full(rejected)) => {
                    record = rejected;
                    // The module may have drained the slot meanwhile.
                    if non_blocking_read(&self.evict).is_some() {
                        evicted += 1;
                        tracing::warn!(module = %self.module, "Log buffer full, evicted oldest record");
                        metrics::record_eviction(&self.module);
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    // Unreachable while `evict` is alive.
                    break;
                }
            }
        }

        tracing::warn!(module = %self.module, "Log buffer full, dropped record after retries");
        metrics::record_drop(&self.module);
        Delivery::Dropped { evicted }
    }
}

/// Read one record if available; never blocks.
pub fn non_blocking_read<T>(rx: &Receiver<T>) -> Option<T> {
    match rx.try_recv() {
        Ok(item) => Some(item),
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
}
