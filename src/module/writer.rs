//! Reference output module writing formatted lines to stdout, stderr or a
//! file.
//!
//! # Recovery
//! ```text
//! write fails on a reopenable output (file):
//!     reopen → retry the record once → still failing: module stops
//! write fails on a console stream:
//!     record dropped, first failure in a row reported
//! flush request:
//!     reopen (picks up rotated files) → drain queued records → flush → ack
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Stderr, Stdout, Write};
use std::mem;
use std::path::{Path, PathBuf};

use crate::module::format::{format_message, process_prefix};
use crate::module::{Module, ModuleChannels, ModuleEvent};
use crate::record::LogRecord;

/// A sink a [`WriterModule`] can write to.
pub trait Output: Write + Send + 'static {
    /// Reopen the underlying target. `None` if it cannot be reopened.
    fn reopen(&mut self) -> Option<io::Result<()>> {
        None
    }
}

impl Output for Stdout {}

impl Output for Stderr {}

/// Log file reopened by path, so renaming it (log rotation) is picked up on
/// the next flush.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileOutput {
    /// Open `path`, creating missing parent directories. With `overwrite`
    /// an existing file is truncated, otherwise appended to.
    pub fn open(path: impl Into<PathBuf>, overwrite: bool) -> io::Result<Self> {
        let path = path.into();
        let writer = BufWriter::new(open_log_file(&path, overwrite)?);
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reopen_file(&mut self) -> io::Result<()> {
        // Buffered lines go to the file they were written for.
        let _ = self.writer.flush();
        let file = open_log_file(&self.path, false)?;
        let old = mem::replace(&mut self.writer, BufWriter::new(file));
        // Whatever the old handle refused is discarded, not flushed again.
        drop(old.into_parts());
        Ok(())
    }
}

impl Write for FileOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Output for FileOutput {
    fn reopen(&mut self) -> Option<io::Result<()>> {
        Some(self.reopen_file())
    }
}

fn open_log_file(path: &Path, overwrite: bool) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if overwrite {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o660);
    }
    options.open(path)
}

/// Writes one formatted line per record.
pub struct WriterModule<W> {
    name: String,
    output: W,
    prefix: String,
    single_line: bool,
    failing: bool,
}

impl WriterModule<Stdout> {
    pub fn stdout() -> Self {
        Self::new("stdout", io::stdout())
    }
}

impl WriterModule<Stderr> {
    pub fn stderr() -> Self {
        Self::new("stderr", io::stderr())
    }
}

impl WriterModule<FileOutput> {
    /// Log to `path`, appending unless `overwrite` is set.
    pub fn file(path: impl AsRef<Path>, overwrite: bool) -> io::Result<Self> {
        let path = path.as_ref();
        let output = FileOutput::open(path, overwrite)?;
        Ok(Self::new(format!("file:{}", path.display()), output))
    }
}

impl<W: Output> WriterModule<W> {
    pub fn new(name: impl Into<String>, output: W) -> Self {
        Self {
            name: name.into(),
            output,
            prefix: process_prefix(),
            single_line: false,
            failing: false,
        }
    }

    /// Replace the default `host name[pid]: ` line prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Collapse newlines in messages and traces into one output line.
    pub fn single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    /// Write one record. An error means the output is unusable even after
    /// reopening.
    fn write_record(&mut self, record: &LogRecord) -> io::Result<()> {
        let line = format_message(record, &self.prefix, self.single_line);
        let err = match writeln!(self.output, "{line}") {
            Ok(()) => {
                self.failing = false;
                return Ok(());
            }
            Err(e) => e,
        };

        match self.output.reopen() {
            None => {
                self.note_failure(err);
                Ok(())
            }
            Some(reopened) => {
                tracing::warn!(module = %self.name, error = %err, "Module write failed, reopening output");
                reopened?;
                writeln!(self.output, "{line}")
            }
        }
    }

    /// Reopen, then write every queued record and flush the output.
    fn flush_pending(&mut self, channels: &ModuleChannels) -> io::Result<()> {
        if let Some(reopened) = self.output.reopen() {
            reopened?;
        }

        let mut result = Ok(());
        channels.drain(|record| {
            if result.is_ok() {
                result = self.write_record(record);
            }
        });
        result?;

        self.flush_output();
        Ok(())
    }

    fn flush_output(&mut self) {
        if let Err(e) = self.output.flush() {
            self.note_failure(e);
        }
    }

    fn note_failure(&mut self, err: io::Error) {
        if !self.failing {
            self.failing = true;
            tracing::warn!(module = %self.name, error = %err, "Module write failed, dropping records");
        }
    }
}

impl<W: Output> Module for WriterModule<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(mut self: Box<Self>, channels: ModuleChannels) {
        while let Some(event) = channels.next() {
            let result = match event {
                ModuleEvent::Record(record) => self.write_record(&record),
                ModuleEvent::Flush(request) => self.flush_pending(&channels).map(|()| request.ack()),
            };
            if let Err(e) = result {
                // Dropping the channels turns later flushes into Disconnected.
                tracing::error!(module = %self.name, error = %e, "Module output lost, stopping module");
                return;
            }
        }
        self.flush_output();
        tracing::debug!(module = %self.name, "Module loop finished");
    }
}
