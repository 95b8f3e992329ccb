//! Stack trace capture for fatal and error records.
//!
//! The trace is taken with `std::backtrace::Backtrace::force_capture`,
//! independent of `RUST_BACKTRACE`. Leading frames that belong to the
//! capture machinery or to rlog's own logging path are stripped (matched by
//! symbol prefix, see [`INTERNAL_FRAME_PREFIXES`]); the remainder is
//! truncated to [`MAX_TRACE_FRAMES`] frames.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::OnceLock;

use regex::Regex;

/// Maximum number of frames kept after stripping internal frames.
pub const MAX_TRACE_FRAMES: usize = 32;

/// Leading frames whose symbol starts with one of these are stripped.
pub const INTERNAL_FRAME_PREFIXES: &[&str] = &[
    "std::backtrace",
    "std::backtrace_rs",
    "rlog::record::stack_trace::capture",
    "rlog::record::LogRecord::build",
    "rlog::lifecycle::logger::Logger::",
    "rlog::lifecycle::global::",
];

/// Text used when the platform cannot produce a backtrace.
pub const UNSUPPORTED_TRACE: &str = "<stack trace unsupported on this platform>";

fn frame_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"^\s*\d+: (.+)$").expect("static regex"))
}

/// Capture the current stack, starting at the first non-internal frame.
pub fn capture() -> String {
    let backtrace = Backtrace::force_capture();
    match backtrace.status() {
        BacktraceStatus::Captured => trim(&backtrace.to_string()),
        _ => UNSUPPORTED_TRACE.to_string(),
    }
}

/// Split rendered backtrace text into frames, drop the leading internal
/// ones and keep at most [`MAX_TRACE_FRAMES`].
pub fn trim(rendered: &str) -> String {
    let frames = split_frames(rendered);
    if frames.is_empty() {
        return rendered.trim_end().to_string();
    }

    let skip = frames
        .iter()
        .take_while(|frame| is_internal(&frame.symbol))
        .count();
    // Never strip everything; a trace of only internal frames is still a trace.
    let skip = if skip == frames.len() { 0 } else { skip };

    let kept: Vec<&str> = frames[skip..]
        .iter()
        .take(MAX_TRACE_FRAMES)
        .map(|frame| frame.text.as_str())
        .collect();
    kept.join("\n").trim_end().to_string()
}

/// Number of frames in a trimmed or rendered trace.
pub fn frame_count(trace: &str) -> usize {
    trace
        .lines()
        .filter(|line| frame_header().is_match(line))
        .count()
}

struct Frame {
    symbol: String,
    text: String,
}

fn split_frames(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for line in rendered.lines() {
        if let Some(caps) = frame_header().captures(line) {
            frames.push(Frame {
                symbol: caps[1].trim().to_string(),
                text: line.to_string(),
            });
        } else if let Some(frame) = frames.last_mut() {
            frame.text.push('\n');
            frame.text.push_str(line);
        }
    }
    frames
}

fn is_internal(symbol: &str) -> bool {
    INTERNAL_FRAME_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}
