//! rlog demo driver.
//!
//! Starts the process-wide logger with a stdout module (and optionally a
//! file module), logs from several worker threads, flushes and reports the
//! per-module flush outcome.
//!
//! ```text
//! rlog --severity debug --workers 4 --messages 50 --output /tmp/rlog.log
//! ```

use std::path::PathBuf;
use std::thread;

use clap::Parser;

use rlog::config::{load_config, validate_config};
use rlog::lifecycle::global;
use rlog::observability::logging;
use rlog::{RlogConfig, Severity, WriterModule};

#[derive(Parser)]
#[command(name = "rlog")]
#[command(about = "Drive the rlog logger from several threads", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the severity threshold (fatal, error, warning, info, debug)
    #[arg(short, long)]
    severity: Option<Severity>,

    /// Override the per-module channel capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Messages logged by each worker
    #[arg(short, long, default_value_t = 10)]
    messages: usize,

    /// Number of logging threads
    #[arg(short, long, default_value_t = 2)]
    workers: usize,

    /// Also log to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Truncate the output file instead of appending
    #[arg(long)]
    overwrite: bool,

    /// Console output on stderr instead of stdout
    #[arg(long)]
    stderr: bool,

    /// Collapse multi-line messages and traces into one line
    #[arg(long)]
    single_line: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("rlog=info");

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RlogConfig::default(),
    };
    if let Some(severity) = cli.severity {
        config.severity = severity;
    }
    if let Some(capacity) = cli.capacity {
        config.chan_capacity = capacity;
    }
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(error = %error, "Invalid configuration");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    if cli.stderr {
        global::enable_module(WriterModule::stderr().single_line(cli.single_line));
    } else {
        global::enable_module(WriterModule::stdout().single_line(cli.single_line));
    }
    if let Some(path) = &cli.output {
        global::enable_module(
            WriterModule::file(path, cli.overwrite)?.single_line(cli.single_line),
        );
    }
    global::start(config);

    rlog::info!("demo starting with {} workers", cli.workers);

    let handles: Vec<_> = (0..cli.workers)
        .map(|worker| {
            let messages = cli.messages;
            thread::Builder::new()
                .name(format!("worker-{worker}"))
                .spawn(move || run_worker(worker, messages))
        })
        .collect::<Result<_, _>>()?;
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("Worker thread panicked");
        }
    }

    rlog::error!(tag: "demo", "sample error with a stack trace");

    let report = global::flush_async().await;
    for (module, outcome) in &report.outcomes {
        println!("flush {module}: {outcome}");
    }

    if report.all_acknowledged() {
        Ok(())
    } else {
        Err("flush incomplete".into())
    }
}

fn run_worker(worker: usize, messages: usize) {
    let tag = format!("worker-{worker}");
    let request = global::generate_id().unwrap_or_default();

    for i in 0..messages {
        match i % 4 {
            0 => rlog::debug!(tag: tag.as_str(), "[{request}] tick {i}"),
            1 => rlog::info!(tag: tag.as_str(), "[{request}] processed item {i}"),
            2 => rlog::warning!(tag: tag.as_str(), "[{request}] slow item {i}"),
            _ => rlog::info!("worker {worker} heartbeat {i}\nsecond line"),
        };
    }
}
