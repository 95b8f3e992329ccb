//! Unique ID generation for correlating log lines.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// Strictly increasing, thread-safe ID source.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub const fn starting_at(value: u64) -> Self {
        Self {
            next: AtomicU64::new(value),
        }
    }

    /// Start from a random offset in `256..=4_194_304` (a multiple of 256),
    /// large enough to be easy to grep for.
    pub fn seeded() -> Self {
        Self::starting_at(random_offset())
    }

    /// Next ID as a number. Two calls never return the same value.
    pub fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Next ID, lowercase hex.
    pub fn generate(&self) -> String {
        format!("{:x}", self.next_value())
    }
}

fn random_offset() -> u64 {
    (rand::thread_rng().gen_range(0..1u64 << 14) + 1) << 8
}
