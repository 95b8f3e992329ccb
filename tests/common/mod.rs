//! Shared modules and helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use rlog::{LogRecord, Module, ModuleChannels, ModuleEvent};

/// Forwards every record to the test and acks every flush.
pub struct CaptureModule {
    name: String,
    tx: Sender<Arc<LogRecord>>,
}

impl CaptureModule {
    pub fn new(name: &str) -> (Self, Receiver<Arc<LogRecord>>) {
        let (tx, rx) = unbounded();
        (
            Self {
                name: name.to_string(),
                tx,
            },
            rx,
        )
    }
}

impl Module for CaptureModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(self: Box<Self>, channels: ModuleChannels) {
        while let Some(event) = channels.next() {
            match event {
                ModuleEvent::Record(record) => {
                    let _ = self.tx.send(record);
                }
                ModuleEvent::Flush(request) => {
                    channels.drain(|record| {
                        let _ = self.tx.send(Arc::new(record.clone()));
                    });
                    request.ack();
                }
            }
        }
    }
}

/// Holds its channels without ever reading them.
pub struct StalledModule {
    name: String,
    parked: Arc<Mutex<Option<ModuleChannels>>>,
}

impl StalledModule {
    pub fn new(name: &str) -> (Self, Arc<Mutex<Option<ModuleChannels>>>) {
        let parked = Arc::new(Mutex::new(None));
        (
            Self {
                name: name.to_string(),
                parked: Arc::clone(&parked),
            },
            parked,
        )
    }
}

impl Module for StalledModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(self: Box<Self>, channels: ModuleChannels) {
        *self.parked.lock().unwrap() = Some(channels);
    }
}

/// Wait for the next record, failing the test after a second.
pub fn recv(rx: &Receiver<Arc<LogRecord>>) -> Arc<LogRecord> {
    rx.recv_timeout(Duration::from_secs(1))
        .expect("record not delivered")
}

/// Collect records until none arrive for 100ms.
pub fn collect(rx: &Receiver<Arc<LogRecord>>) -> Vec<Arc<LogRecord>> {
    let mut records = Vec::new();
    while let Ok(record) = rx.recv_timeout(Duration::from_millis(100)) {
        records.push(record);
    }
    records
}

/// Wait until a stalled module has parked its channels.
pub fn wait_parked(parked: &Arc<Mutex<Option<ModuleChannels>>>) {
    for _ in 0..100 {
        if parked.lock().unwrap().is_some() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("stalled module never started");
}
