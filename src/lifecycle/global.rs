//! Process-wide logger facade.
//!
//! A thin layer over [`LoggerBuilder`] and [`Logger`] for programs that want
//! one logger reachable from anywhere (the `fatal!` .. `debug!` macros log
//! through it). Modules are collected with [`enable_module`], [`start`]
//! freezes them, and every later call goes to the running logger.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;

use crate::bus::FlushReport;
use crate::config::RlogConfig;
use crate::lifecycle::builder::LoggerBuilder;
use crate::lifecycle::logger::Logger;
use crate::module::Module;
use crate::record::Severity;

static PENDING: Mutex<Vec<Box<dyn Module>>> = Mutex::new(Vec::new());
static RUNNING: ArcSwapOption<Logger> = ArcSwapOption::const_empty();

fn pending() -> MutexGuard<'static, Vec<Box<dyn Module>>> {
    PENDING.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_started() -> bool {
    RUNNING.load().is_some()
}

/// The running logger, if started.
pub fn logger() -> Option<Logger> {
    RUNNING.load_full().map(|logger| Logger::clone(&logger))
}

/// Register a module for the next [`start`].
///
/// Once running, the module is discarded and an error is logged.
#[track_caller]
pub fn enable_module(module: impl Module) {
    let mut pending = pending();
    if let Some(logger) = RUNNING.load_full() {
        logger.error(format_args!(
            "Cannot register module {} when logger already running",
            module.name()
        ));
        return;
    }
    pending.push(Box::new(module));
}

/// Start the process-wide logger with every module enabled so far.
///
/// A second call is rejected: it logs an error through the running logger
/// and returns false.
#[track_caller]
pub fn start(config: RlogConfig) -> bool {
    let mut pending = pending();
    if let Some(logger) = RUNNING.load_full() {
        logger.error(format_args!(
            "Logger initialization triggered but logger already initialized"
        ));
        return false;
    }

    let mut builder = LoggerBuilder::new();
    for module in pending.drain(..) {
        builder.register(module);
    }
    RUNNING.store(Some(Arc::new(builder.start(config))));
    true
}

/// Log through the running logger. Returns false if not started.
#[track_caller]
pub fn log(severity: Severity, tag: Option<&str>, args: fmt::Arguments<'_>) -> bool {
    let running = RUNNING.load();
    match &*running {
        Some(logger) => logger.log(severity, tag, args),
        None => {
            tracing::warn!(severity = %severity, dropped = %args, "Logger not started");
            false
        }
    }
}

/// Flush the running logger, blocking the calling thread. Empty report if
/// not started.
pub fn flush() -> FlushReport {
    match logger() {
        Some(logger) => logger.flush(),
        None => FlushReport::default(),
    }
}

/// Like [`flush`], for async callers on a tokio runtime.
pub async fn flush_async() -> FlushReport {
    match logger() {
        Some(logger) => logger.flush_async().await,
        None => FlushReport::default(),
    }
}

/// Unique ID from the running logger, `None` if not started.
pub fn generate_id() -> Option<String> {
    logger().map(|logger| logger.generate_id())
}

/// Return to the uninitialized state, forgetting pending modules and the
/// running logger.
///
/// For test suites only: callers still holding a [`Logger`] keep using the
/// old one, and concurrent logging during a reset is undefined in effect.
#[doc(hidden)]
pub fn reset_state() {
    let mut pending = pending();
    pending.clear();
    RUNNING.store(None);
}
