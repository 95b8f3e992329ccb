//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log severity, ordered from most to least severe.
///
/// The numeric encoding keeps `Fatal` lowest so that "less severe than the
/// threshold" is a single `>` comparison.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Debug = 4,
}

impl Severity {
    /// All levels, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// Level name as it appears in record headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// True if `self` is strictly less severe than `threshold`.
    pub fn is_less_severe_than(self, threshold: Severity) -> bool {
        self > threshold
    }

    /// Fatal and error records carry a stack trace.
    pub fn captures_stack_trace(self) -> bool {
        self <= Severity::Error
    }

    /// Fatal and error records include `file:line` in their header by default.
    pub fn includes_position(self) -> bool {
        self <= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a severity level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseSeverityError;

    fn try_from(value: String) -> Result<Self, ParseSeverityError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_ascii_lowercase()
    }
}
