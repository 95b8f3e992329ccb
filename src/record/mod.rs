//! Log record construction.
//!
//! # Data Flow
//! ```text
//! format_args!(..) + severity + tag
//!     → call_site.rs (user call site via #[track_caller])
//!     → stack_trace.rs (fatal/error only)
//!     → LogRecord (immutable, shared as Arc across modules)
//! ```
//!
//! # Design Decisions
//! - The record is format-agnostic: modules choose their own line layout
//! - Stack traces are captured only for fatal and error
//! - An unresolvable call site becomes the `unknown` sentinel, never an error

pub mod call_site;
pub mod severity;
pub mod stack_trace;

use std::fmt;

pub use call_site::CallSite;
pub use severity::{ParseSeverityError, Severity};

/// Timestamp layout, e.g. `Jan  2 15:04:05`.
pub const TIMESTAMP_FORMAT: &str = "%b %e %H:%M:%S";

/// A single log message as delivered to modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Formatted message text.
    pub message: String,
    /// `<LEVEL> [tag] [file:line] `, tag and position optional.
    pub header: String,
    /// Local time at construction, preformatted.
    pub timestamp: String,
    pub severity: Severity,
    pub tag: Option<String>,
    pub call_site: CallSite,
    /// Empty unless severity is fatal or error.
    pub stack_trace: String,
    /// Strictly increasing per logger.
    pub sequence: u64,
}

/// Caller input for a record.
#[derive(Debug, Clone, Copy)]
pub struct RecordInput<'a> {
    pub severity: Severity,
    pub tag: Option<&'a str>,
    pub args: fmt::Arguments<'a>,
    /// Include `file:line` in the header.
    pub position: bool,
    pub call_site: CallSite,
}

impl<'a> RecordInput<'a> {
    /// Input with the default position policy for `severity`.
    pub fn new(
        severity: Severity,
        tag: Option<&'a str>,
        args: fmt::Arguments<'a>,
        call_site: CallSite,
    ) -> Self {
        Self {
            severity,
            tag,
            args,
            position: severity.includes_position(),
            call_site,
        }
    }
}

impl LogRecord {
    /// Build a record, capturing a stack trace for fatal and error.
    pub fn build(input: RecordInput<'_>, sequence: u64) -> Self {
        let stack_trace = if input.severity.captures_stack_trace() {
            stack_trace::capture()
        } else {
            String::new()
        };

        Self {
            message: fmt::format(input.args),
            header: format_header(input.severity, input.tag, input.position, &input.call_site),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            severity: input.severity,
            tag: input.tag.map(str::to_string),
            call_site: input.call_site,
            stack_trace,
            sequence,
        }
    }

    /// Header followed by the message.
    pub fn text(&self) -> String {
        format!("{}{}", self.header, self.message)
    }

    pub fn has_stack_trace(&self) -> bool {
        !self.stack_trace.is_empty()
    }
}

/// Compose the record header.
pub fn format_header(
    severity: Severity,
    tag: Option<&str>,
    position: bool,
    call_site: &CallSite,
) -> String {
    let mut header = format!("<{}> ", severity.as_str());
    if let Some(tag) = tag {
        header.push_str(&format!("[{tag}] "));
    }
    if position {
        header.push_str(&format!("[{}:{}] ", call_site.file, call_site.line));
    }
    header
}
