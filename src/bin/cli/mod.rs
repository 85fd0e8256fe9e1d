//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution logic
//! - config_layer: configuration layer management and merging
//! - output: console and JSON report rendering

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod output;

pub use args::*;
pub use commands::*;
