//! Tests for the process-wide facade and its macros.
//!
//! The facade is global state, so every test holds `LOCK` and starts from
//! `reset_state`.

mod common;

use std::sync::{Mutex, MutexGuard, PoisonError};

use rlog::lifecycle::global;
use rlog::{RlogConfig, Severity};

use common::{collect, recv, CaptureModule};

static LOCK: Mutex<()> = Mutex::new(());

fn isolated() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    global::reset_state();
    guard
}

#[test]
fn test_calls_before_start_are_rejected() {
    let _guard = isolated();

    assert!(!global::is_started());
    assert!(!rlog::info!("nobody listens"));
    assert!(global::generate_id().is_none());
    assert!(global::logger().is_none());
    assert!(global::flush().outcomes.is_empty());
}

#[test]
fn test_macros_log_through_started_logger() {
    let _guard = isolated();
    let (capture, rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    assert!(global::start(RlogConfig {
        severity: Severity::Debug,
        ..RlogConfig::default()
    }));
    assert!(global::is_started());

    assert!(rlog::debug!("plain {}", 1));
    let line = line!() + 1;
    assert!(rlog::warning!(tag: "net", "tagged {}", 2));

    let plain = recv(&rx);
    assert_eq!(plain.message, "plain 1");
    assert_eq!(plain.header, "<DEBUG> ");

    let tagged = recv(&rx);
    assert_eq!(tagged.message, "tagged 2");
    assert_eq!(tagged.tag.as_deref(), Some("net"));
    assert_eq!(tagged.severity, Severity::Warning);
    assert_eq!(tagged.call_site.file, file!());
    assert_eq!(tagged.call_site.line, line);
}

#[test]
fn test_error_macro_reports_position() {
    let _guard = isolated();
    let (capture, rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    global::start(RlogConfig::default());

    let line = line!() + 1;
    rlog::error!("boom");

    let record = recv(&rx);
    assert_eq!(record.header, format!("<ERROR> [{}:{}] ", file!(), line));
    assert!(record.has_stack_trace());
}

#[test]
fn test_second_start_is_logged_and_ignored() {
    let _guard = isolated();
    let (capture, rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    assert!(global::start(RlogConfig::default()));

    assert!(!global::start(RlogConfig {
        severity: Severity::Debug,
        ..RlogConfig::default()
    }));

    let record = recv(&rx);
    assert_eq!(record.severity, Severity::Error);
    assert!(record.message.contains("already initialized"));

    // The first configuration stays in force.
    rlog::debug!("still filtered");
    assert!(collect(&rx).is_empty());
}

#[test]
fn test_module_enabled_after_start_is_discarded() {
    let _guard = isolated();
    let (capture, rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    global::start(RlogConfig::default());

    let (late, late_rx) = CaptureModule::new("late");
    global::enable_module(late);

    let record = recv(&rx);
    assert_eq!(record.severity, Severity::Error);
    assert!(record.message.contains("late"));
    assert_eq!(global::logger().unwrap().module_count(), 1);

    rlog::info!("after");
    assert_eq!(recv(&rx).message, "after");
    assert!(late_rx.try_recv().is_err());
}

#[test]
fn test_reset_state_allows_a_fresh_start() {
    let _guard = isolated();
    let (first, first_rx) = CaptureModule::new("first");
    global::enable_module(first);
    global::start(RlogConfig::default());

    global::reset_state();
    assert!(!global::is_started());

    let (second, second_rx) = CaptureModule::new("second");
    global::enable_module(second);
    assert!(global::start(RlogConfig::default()));

    rlog::info!("fresh");
    assert_eq!(recv(&second_rx).message, "fresh");
    assert!(collect(&first_rx).is_empty());
}

#[tokio::test]
async fn test_generate_id_and_flush_after_start() {
    let _guard = isolated();
    let (capture, _rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    global::start(RlogConfig::default());

    let a = global::generate_id().unwrap();
    let b = global::generate_id().unwrap();
    assert_ne!(a, b);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

    let report = global::flush_async().await;
    assert!(report.all_acknowledged());
    assert_eq!(report.outcomes.len(), 1);
}

#[test]
fn test_blocking_flush_without_runtime() {
    let _guard = isolated();
    let (capture, rx) = CaptureModule::new("capture");
    global::enable_module(capture);
    global::start(RlogConfig::default());

    rlog::info!("queued");
    let report = global::flush();

    assert!(report.all_acknowledged());
    assert_eq!(rx.try_iter().count(), 1);
}
