//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or RlogConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RlogConfig (validated)
//!     → LoggerBuilder::start (frozen for the logger's lifetime)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the logger starts; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{RlogConfig, TagFilter};
pub use validation::{validate_config, ValidationError};
