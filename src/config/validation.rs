//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, bounded flush timeout)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RlogConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::RlogConfig;

/// Longest flush timeout accepted, in seconds.
pub const MAX_FLUSH_TIMEOUT_SECS: u64 = 3600;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("chan_capacity must be greater than zero")]
    ZeroCapacity,

    #[error("flush_timeout_secs must be at most {max}, got {actual}")]
    FlushTimeoutTooLong { actual: u64, max: u64 },

    #[error("tag filter has an empty tag")]
    EmptyTag,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RlogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chan_capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    if config.flush_timeout_secs > MAX_FLUSH_TIMEOUT_SECS {
        errors.push(ValidationError::FlushTimeoutTooLong {
            actual: config.flush_timeout_secs,
            max: MAX_FLUSH_TIMEOUT_SECS,
        });
    }

    if let Some(filter) = &config.tag_filter {
        if filter.tags().iter().any(|tag| tag.trim().is_empty()) {
            errors.push(ValidationError::EmptyTag);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
