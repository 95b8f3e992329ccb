//! Flush coordination.
//!
//! # Protocol
//! ```text
//! Request: try_send(FlushRequest) into the module's capacity-1 flush channel
//!     slot occupied  → AlreadyPending (a flush is in flight)
//!     module gone    → Disconnected
//! Ack: recv_timeout on the request's capacity-1 reply channel
//!     true received  → Acknowledged
//!     timeout        → TimedOut (reply slot abandoned, module never blocks)
//! ```
//!
//! The wait is a plain blocking receive, so flushing works from any thread
//! with or without an async runtime. A zero timeout only picks up an ack
//! that is already there.

use std::fmt;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::observability::metrics;

/// A single flush request delivered to a module.
///
/// The module drains its queued records, then calls [`FlushRequest::ack`].
#[derive(Debug)]
pub struct FlushRequest {
    reply: Sender<bool>,
}

impl FlushRequest {
    /// Acknowledge the flush. Never blocks, even if the coordinator gave up.
    pub fn ack(self) {
        let _ = self.reply.try_send(true);
    }
}

/// Result of flushing one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Acknowledged,
    /// A previous request has not been consumed yet.
    AlreadyPending,
    /// The module's flush receiver is gone.
    Disconnected,
    /// The module did not answer within the timeout.
    TimedOut,
    /// The module dropped the request without acknowledging.
    Abandoned,
}

impl FlushOutcome {
    pub fn is_success(self) -> bool {
        self == FlushOutcome::Acknowledged
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlushOutcome::Acknowledged => "acknowledged",
            FlushOutcome::AlreadyPending => "already_pending",
            FlushOutcome::Disconnected => "disconnected",
            FlushOutcome::TimedOut => "timed_out",
            FlushOutcome::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for FlushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Producer side of a module's flush channel.
#[derive(Debug, Clone)]
pub struct FlushChannel {
    module: String,
    tx: Sender<FlushRequest>,
}

impl FlushChannel {
    /// Create a capacity-1 flush channel. Returns the producer side and the
    /// receiver handed to the module.
    pub fn new(module: impl Into<String>) -> (Self, Receiver<FlushRequest>) {
        let (tx, rx) = bounded(1);
        let channel = Self {
            module: module.into(),
            tx,
        };
        (channel, rx)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Run the two-phase flush protocol against this module, blocking the
    /// calling thread for at most `timeout`.
    pub fn flush(&self, timeout: Duration) -> FlushOutcome {
        let outcome = self.request(timeout);
        metrics::record_flush(&self.module, outcome.as_str());
        match outcome {
            FlushOutcome::Acknowledged => {
                tracing::debug!(module = %self.module, "Flush acknowledged");
            }
            FlushOutcome::AlreadyPending => {
                tracing::warn!(module = %self.module, "Sending flush command to module failed, pending flush?");
            }
            FlushOutcome::TimedOut => {
                tracing::warn!(
                    module = %self.module,
                    timeout_ms = timeout.as_millis() as u64,
                    "Flush command ACK timed out"
                );
            }
            other => {
                tracing::warn!(module = %self.module, outcome = %other, "Flush failed");
            }
        }
        outcome
    }

    fn request(&self, timeout: Duration) -> FlushOutcome {
        let (reply, ack) = bounded(1);

        // Phase 1: hand the module a reply slot.
        match self.tx.try_send(FlushRequest { reply }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => return FlushOutcome::AlreadyPending,
            Err(TrySendError::Disconnected(_)) => return FlushOutcome::Disconnected,
        }

        // Phase 2: wait for the ack or give up.
        match ack.recv_timeout(timeout) {
            Ok(true) => FlushOutcome::Acknowledged,
            Ok(false) | Err(RecvTimeoutError::Disconnected) => FlushOutcome::Abandoned,
            Err(RecvTimeoutError::Timeout) => FlushOutcome::TimedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphaned_channel_times_out() {
        let (channel, _rx) = FlushChannel::new("orphan");
        let outcome = channel.flush(Duration::ZERO);
        assert_eq!(outcome, FlushOutcome::TimedOut);
    }

    #[test]
    fn test_second_request_while_pending_fails_fast() {
        let (channel, _rx) = FlushChannel::new("orphan");
        assert_eq!(channel.flush(Duration::ZERO), FlushOutcome::TimedOut);
        assert_eq!(
            channel.flush(Duration::from_secs(60)),
            FlushOutcome::AlreadyPending
        );
    }

    #[test]
    fn test_acking_module_succeeds() {
        let (channel, rx) = FlushChannel::new("acker");
        std::thread::spawn(move || {
            if let Ok(request) = rx.recv() {
                request.ack();
            }
        });

        let outcome = channel.flush(Duration::from_secs(2));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_dropped_receiver_is_disconnected() {
        let (channel, rx) = FlushChannel::new("gone");
        drop(rx);
        assert_eq!(channel.flush(Duration::ZERO), FlushOutcome::Disconnected);
    }

    #[test]
    fn test_dropped_request_is_abandoned() {
        let (channel, rx) = FlushChannel::new("rude");
        std::thread::spawn(move || {
            let _ = rx.recv();
        });
        assert_eq!(
            channel.flush(Duration::from_secs(2)),
            FlushOutcome::Abandoned
        );
    }

    #[test]
    fn test_late_ack_does_not_block_module() {
        let (channel, rx) = FlushChannel::new("slow");
        assert_eq!(channel.flush(Duration::ZERO), FlushOutcome::TimedOut);

        // The abandoned reply slot still accepts the ack.
        let request = rx.try_recv().unwrap();
        request.ack();
        assert!(rx.try_recv().is_err());
    }
}
