//! Line formatting helpers for output modules.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::record::LogRecord;

/// Replacement for runs of tabs and newlines in single-line output.
const WHITESPACE_REPLACEMENT: &str = "  ";

fn whitespace_run() -> &'static Regex {
    static RUN: OnceLock<Regex> = OnceLock::new();
    RUN.get_or_init(|| Regex::new(r"[\r\n\t]+").expect("static regex"))
}

/// `host name[pid]: ` prefix identifying this machine and process.
///
/// If the hostname cannot be read the host part is left out.
pub fn process_prefix() -> String {
    let name = std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "rlog".to_string());
    let pid = std::process::id();

    match hostname::get() {
        Ok(host) if !host.is_empty() => {
            format!("{} {}[{}]: ", host.to_string_lossy(), name, pid)
        }
        Ok(_) => format!("{}[{}]: ", name, pid),
        Err(e) => {
            tracing::warn!(error = %e, "Could not fetch machine hostname");
            format!("{}[{}]: ", name, pid)
        }
    }
}

/// Collapse tabs and newlines into double spaces and trim the ends.
pub fn replace_newlines(text: &str) -> String {
    whitespace_run()
        .replace_all(text, WHITESPACE_REPLACEMENT)
        .trim_matches(' ')
        .to_string()
}

/// Render a record as `timestamp prefix header message`.
///
/// The stack trace, if any, follows on new lines, or after `, trace: `
/// when `single_line` is set.
pub fn format_message(record: &LogRecord, prefix: &str, single_line: bool) -> String {
    let mut text = record.text();
    if single_line {
        text = replace_newlines(&text);
    }

    let mut line = format!("{} {}{}", record.timestamp, prefix, text);
    if record.has_stack_trace() {
        if single_line {
            line.push_str(", trace: ");
            line.push_str(&replace_newlines(&record.stack_trace));
        } else {
            line.push('\n');
            line.push_str(&record.stack_trace);
        }
    }
    line
}
