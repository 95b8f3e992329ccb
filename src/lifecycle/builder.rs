//! Registration phase.

use std::thread;

use crate::bus::{Binding, Bus};
use crate::config::RlogConfig;
use crate::lifecycle::id::IdGenerator;
use crate::lifecycle::logger::Logger;
use crate::module::Module;

/// Collects modules before the logger starts.
///
/// [`LoggerBuilder::start`] consumes the builder, so nothing can be
/// registered once the logger is running.
#[derive(Default)]
pub struct LoggerBuilder {
    modules: Vec<Box<dyn Module>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an output module.
    pub fn module(mut self, module: impl Module) -> Self {
        self.register(Box::new(module));
        self
    }

    /// Register an already boxed module.
    pub fn register(&mut self, module: Box<dyn Module>) {
        tracing::debug!(module = %module.name(), "Module registered");
        self.modules.push(module);
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Freeze the configuration, bind every module to a fresh channel pair
    /// and launch each module loop on its own thread.
    pub fn start(self, config: RlogConfig) -> Logger {
        let mut bindings = Vec::with_capacity(self.modules.len());

        for module in self.modules {
            let name = module.name().to_string();
            let (binding, channels) = Binding::new(&name, config.chan_capacity);

            let spawned = thread::Builder::new()
                .name(format!("rlog-{name}"))
                .spawn(move || module.run(channels));
            if let Err(e) = spawned {
                // The binding stays; its records are evicted and flushes time out.
                tracing::error!(module = %name, error = %e, "Failed to launch module thread");
            }

            bindings.push(binding);
        }

        tracing::info!(
            modules = bindings.len(),
            chan_capacity = config.chan_capacity,
            flush_timeout_secs = config.flush_timeout_secs,
            severity = %config.severity,
            "Logger started"
        );

        Logger::new(config, Bus::new(bindings), IdGenerator::seeded())
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.modules.iter().map(|m| m.name()).collect();
        f.debug_struct("LoggerBuilder").field("modules", &names).finish()
    }
}
