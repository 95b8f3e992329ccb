//! Output module contract.
//!
//! # Data Flow
//! ```text
//! LoggerBuilder::start
//!     → Module::run(ModuleChannels) on a dedicated thread, exactly once
//!
//! Module loop:
//!     ModuleEvent::Record → format / write (module-local I/O recovery)
//!     ModuleEvent::Flush  → drain queued records (non-blocking) → ack
//! ```
//!
//! # Design Decisions
//! - A module is anything that can run a consume-or-flush loop
//! - `ModuleChannels::next` selects fairly over both inputs
//! - Modules own their I/O recovery; the core never restarts them

pub mod format;
pub mod writer;

use std::sync::Arc;

use crossbeam_channel::{select, Receiver};

use crate::bus::channel::non_blocking_read;
use crate::bus::flush::FlushRequest;
use crate::record::LogRecord;

pub use writer::{FileOutput, Output, WriterModule};

/// An output module: consumes records until the logger goes away.
pub trait Module: Send + 'static {
    /// Name used in diagnostics, metrics and thread names.
    fn name(&self) -> &str;

    /// Module loop. Called exactly once, on its own thread.
    fn run(self: Box<Self>, channels: ModuleChannels);
}

/// Something a module has to react to.
#[derive(Debug)]
pub enum ModuleEvent {
    Record(Arc<LogRecord>),
    Flush(FlushRequest),
}

/// The two inputs handed to a module at start.
#[derive(Debug)]
pub struct ModuleChannels {
    records: Receiver<Arc<LogRecord>>,
    flushes: Receiver<FlushRequest>,
}

impl ModuleChannels {
    pub fn new(records: Receiver<Arc<LogRecord>>, flushes: Receiver<FlushRequest>) -> Self {
        Self { records, flushes }
    }

    /// Block until a record or a flush request arrives.
    ///
    /// When both are ready, one is picked at random so neither input starves.
    /// Returns `None` once the logger is gone and no records are left.
    pub fn next(&self) -> Option<ModuleEvent> {
        select! {
            recv(self.records) -> record => record.ok().map(ModuleEvent::Record),
            recv(self.flushes) -> request => match request {
                Ok(request) => Some(ModuleEvent::Flush(request)),
                Err(_) => self.try_next_record().map(ModuleEvent::Record),
            },
        }
    }

    /// Next queued record, if any; never blocks.
    pub fn try_next_record(&self) -> Option<Arc<LogRecord>> {
        non_blocking_read(&self.records)
    }

    /// Hand every currently queued record to `f` without waiting for new
    /// ones. Returns the number of records drained.
    pub fn drain(&self, mut f: impl FnMut(&LogRecord)) -> usize {
        let mut drained = 0;
        while let Some(record) = self.try_next_record() {
            f(&record);
            drained += 1;
        }
        drained
    }

    /// Raw record receiver, for modules with their own select loop.
    pub fn records(&self) -> &Receiver<Arc<LogRecord>> {
        &self.records
    }

    /// Raw flush receiver, for modules with their own select loop.
    pub fn flushes(&self) -> &Receiver<FlushRequest> {
        &self.flushes
    }
}
