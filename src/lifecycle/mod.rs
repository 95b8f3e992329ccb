//! Lifecycle management subsystem.
//!
//! # States
//! ```text
//! Registering (builder.rs):
//!     LoggerBuilder::new() → .module(..) / .register(..)
//!
//! Running (logger.rs):
//!     LoggerBuilder::start(config) → Logger
//!     (bindings created, one thread per module, config frozen)
//!
//! Process-wide facade (global.rs):
//!     Uninitialized → enable_module(..) → start(config) → running
//!     reset_state() → Uninitialized (tests only)
//! ```
//!
//! # Design Decisions
//! - `start` consumes the builder; registering after start is unrepresentable
//!   on the handle and logged as an error on the facade
//! - A second facade start is logged as an error and ignored
//! - There is no shutdown beyond flush; module threads end when the last
//!   `Logger` handle is dropped

pub mod builder;
pub mod global;
pub mod id;
pub mod logger;

pub use builder::LoggerBuilder;
pub use id::IdGenerator;
pub use logger::Logger;
