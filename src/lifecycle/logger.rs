//! Running phase: the logger handle.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::bus::{Bus, FlushReport};
use crate::config::RlogConfig;
use crate::filter;
use crate::lifecycle::id::IdGenerator;
use crate::observability::metrics;
use crate::record::{CallSite, LogRecord, RecordInput, Severity};

/// Handle to a running logger. Cheap to clone; every clone logs to the
/// same modules.
///
/// All logging methods are `#[track_caller]`: the reported file and line
/// are those of the code calling them.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

struct Inner {
    config: RlogConfig,
    bus: Bus,
    ids: IdGenerator,
    sequence: AtomicU64,
}

impl Logger {
    pub(crate) fn new(config: RlogConfig, bus: Bus, ids: IdGenerator) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                bus,
                ids,
                sequence: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &RlogConfig {
        &self.inner.config
    }

    pub fn bus(&self) -> &Bus {
        &self.inner.bus
    }

    /// Number of bound modules.
    pub fn module_count(&self) -> usize {
        self.inner.bus.len()
    }

    /// Filter, build and broadcast one message. Never blocks beyond the
    /// bus's bounded retries.
    ///
    /// Always returns true: a running logger accepts every call, whether or
    /// not the message passes the filters.
    #[track_caller]
    pub fn log(&self, severity: Severity, tag: Option<&str>, args: fmt::Arguments<'_>) -> bool {
        self.log_at(severity, tag, args, CallSite::caller())
    }

    /// Like [`Logger::log`] with an explicit call site.
    pub fn log_at(
        &self,
        severity: Severity,
        tag: Option<&str>,
        args: fmt::Arguments<'_>,
        call_site: CallSite,
    ) -> bool {
        if filter::should_drop(&self.inner.config, severity, tag) {
            metrics::record_filtered();
            return true;
        }

        let input = RecordInput::new(severity, tag, args, call_site);
        self.dispatch(input);
        true
    }

    /// Build and broadcast without consulting the filters.
    pub fn dispatch(&self, input: RecordInput<'_>) {
        let sequence = self.inner.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = Arc::new(LogRecord::build(input, sequence));
        self.inner.bus.broadcast(record);
    }

    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Fatal, None, args)
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Error, None, args)
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Warning, None, args)
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Info, None, args)
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Debug, None, args)
    }

    #[track_caller]
    pub fn fatal_t(&self, tag: &str, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Fatal, Some(tag), args)
    }

    #[track_caller]
    pub fn error_t(&self, tag: &str, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Error, Some(tag), args)
    }

    #[track_caller]
    pub fn warning_t(&self, tag: &str, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Warning, Some(tag), args)
    }

    #[track_caller]
    pub fn info_t(&self, tag: &str, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Info, Some(tag), args)
    }

    #[track_caller]
    pub fn debug_t(&self, tag: &str, args: fmt::Arguments<'_>) -> bool {
        self.log(Severity::Debug, Some(tag), args)
    }

    /// Unique ID (lowercase hex) for correlating log lines.
    pub fn generate_id(&self) -> String {
        self.inner.ids.generate()
    }

    /// Ask every module to write back queued records, blocking at most the
    /// configured flush timeout per module. Best-effort.
    ///
    /// Needs no async runtime. From async code prefer
    /// [`Logger::flush_async`], which keeps the wait off the executor.
    pub fn flush(&self) -> FlushReport {
        let report = self.inner.bus.flush(self.inner.config.flush_timeout());
        if !report.all_acknowledged() {
            tracing::warn!(
                acknowledged = report.acknowledged(),
                modules = report.outcomes.len(),
                "Flush incomplete"
            );
        }
        report
    }

    /// [`Logger::flush`] on tokio's blocking pool.
    pub async fn flush_async(&self) -> FlushReport {
        let logger = self.clone();
        match tokio::task::spawn_blocking(move || logger.flush()).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Flush task failed");
                FlushReport::default()
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.inner.config)
            .field("modules", &self.inner.bus.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Binding;

    fn logger_with_channel(config: RlogConfig) -> (Logger, crate::module::ModuleChannels) {
        let (binding, channels) = Binding::new("test", config.chan_capacity);
        let logger = Logger::new(config, Bus::new(vec![binding]), IdGenerator::seeded());
        (logger, channels)
    }

    #[test]
    fn test_filtered_message_is_not_delivered() {
        let (logger, channels) = logger_with_channel(RlogConfig {
            severity: Severity::Warning,
            ..RlogConfig::default()
        });

        assert!(logger.info(format_args!("quiet")));
        assert!(channels.try_next_record().is_none());

        assert!(logger.warning(format_args!("loud")));
        assert_eq!(channels.try_next_record().unwrap().message, "loud");
    }

    #[test]
    fn test_tagged_message_respects_tag_filter() {
        let mut config = RlogConfig {
            severity: Severity::Debug,
            ..RlogConfig::default()
        };
        config.allow_tags_except(["noisy"]);
        let (logger, channels) = logger_with_channel(config);

        logger.debug_t("noisy", format_args!("dropped"));
        logger.debug_t("calm", format_args!("kept"));

        let record = channels.try_next_record().unwrap();
        assert_eq!(record.message, "kept");
        assert_eq!(record.tag.as_deref(), Some("calm"));
        assert!(channels.try_next_record().is_none());
    }

    #[test]
    fn test_sequence_increases() {
        let (logger, channels) = logger_with_channel(RlogConfig::default());
        logger.info(format_args!("a"));
        logger.info(format_args!("b"));

        let a = channels.try_next_record().unwrap();
        let b = channels.try_next_record().unwrap();
        assert!(a.sequence < b.sequence);
    }

    #[test]
    fn test_error_carries_position_and_trace() {
        let (logger, channels) = logger_with_channel(RlogConfig::default());
        let line = line!() + 1;
        logger.error(format_args!("posTest"));

        let record = channels.try_next_record().unwrap();
        assert_eq!(record.call_site.file, file!());
        assert_eq!(record.call_site.line, line);
        assert!(record.header.contains(&format!("{}:{}", file!(), line)));
        assert!(record.has_stack_trace());
    }

    #[test]
    fn test_flush_without_runtime_reports_live_and_orphaned_modules() {
        let config = RlogConfig {
            flush_timeout_secs: 1,
            ..RlogConfig::default()
        };
        let (live, live_channels) = Binding::new("live", config.chan_capacity);
        let (orphan, _orphan_channels) = Binding::new("orphan", config.chan_capacity);
        let logger = Logger::new(config, Bus::new(vec![live, orphan]), IdGenerator::seeded());

        std::thread::spawn(move || {
            while let Some(event) = live_channels.next() {
                if let crate::module::ModuleEvent::Flush(request) = event {
                    request.ack();
                }
            }
        });

        let report = logger.flush();
        assert_eq!(
            report.outcomes,
            vec![
                ("live".to_string(), crate::bus::FlushOutcome::Acknowledged),
                ("orphan".to_string(), crate::bus::FlushOutcome::TimedOut),
            ]
        );
    }

    #[tokio::test]
    async fn test_flush_async_matches_blocking_flush() {
        let (logger, _channels) = logger_with_channel(RlogConfig {
            flush_timeout_secs: 0,
            ..RlogConfig::default()
        });
        let report = logger.flush_async().await;
        assert_eq!(
            report.outcome("test"),
            Some(crate::bus::FlushOutcome::TimedOut)
        );
    }

    #[test]
    fn test_ids_differ() {
        let (logger, _channels) = logger_with_channel(RlogConfig::default());
        assert_ne!(logger.generate_id(), logger.generate_id());
    }
}
