//! Logging macros for the process-wide logger.
//!
//! Each macro takes an optional `tag: <expr>,` prefix followed by
//! `format!`-style arguments, and evaluates to `false` if the logger has
//! not been started.
//!
//! ```ignore
//! rlog::info!("listening on {}", addr);
//! rlog::error!(tag: "db", "query failed: {}", err);
//! ```

/// Log at an explicit severity.
#[macro_export]
macro_rules! log {
    ($severity:expr, tag: $tag:expr, $($arg:tt)+) => {
        $crate::lifecycle::global::log(
            $severity,
            ::core::option::Option::Some($tag),
            ::core::format_args!($($arg)+),
        )
    };
    ($severity:expr, $($arg:tt)+) => {
        $crate::lifecycle::global::log(
            $severity,
            ::core::option::Option::None,
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Fatal, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Error, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Info, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::log!($crate::Severity::Debug, $($arg)+) };
}
