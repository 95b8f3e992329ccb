//! Metrics collection.
//!
//! # Metrics
//! - `rlog_records_evicted_total` (counter): queued records evicted to make room, by module
//! - `rlog_records_dropped_total` (counter): new records dropped after all push attempts, by module
//! - `rlog_records_filtered_total` (counter): messages rejected by the severity/tag gate
//! - `rlog_flush_total` (counter): flush attempts, by module and outcome
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - No exporter is installed here; without a recorder these are no-ops

pub fn record_eviction(module: &str) {
    metrics::counter!("rlog_records_evicted_total", "module" => module.to_string()).increment(1);
}

pub fn record_drop(module: &str) {
    metrics::counter!("rlog_records_dropped_total", "module" => module.to_string()).increment(1);
}

pub fn record_filtered() {
    metrics::counter!("rlog_records_filtered_total").increment(1);
}

pub fn record_flush(module: &str, outcome: &'static str) {
    metrics::counter!(
        "rlog_flush_total",
        "module" => module.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
