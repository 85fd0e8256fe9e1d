//! CLI Command Implementations
//!
//! - rewrite: placeholder migration over a directory
//! - config: configuration management commands

pub mod config;
pub mod rewrite;

pub use config::{init_config, print_default_config, validate_config};
pub use rewrite::rewrite_command;
