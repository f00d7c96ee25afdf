//! stagehand-utils: Common utilities shared across stagehand crates
//!
//! This crate provides:
//! - Unified error types ([`StagehandError`], [`Result`])
//! - Logging infrastructure ([`init_logging`], [`LogConfig`])
//! - OS path resolution ([`paths`] module), including the editor
//!   user-settings file location

pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use error::{Result, StagehandError};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};

// Re-export commonly used path functions
pub use paths::{config_dir, config_file, editor_settings_file, log_dir, state_dir};
