//! # pgparams: positional placeholder migration
//!
//! A one-off source migration tool for moving a Node.js backend from a MySQL
//! driver to a PostgreSQL driver. It scans a directory of controller files,
//! finds database query invocations, and renumbers the generic `?`
//! placeholders inside each invocation into the `$1`, `$2`, … markers that
//! PostgreSQL expects.
//!
//! The tool never parses SQL or JavaScript. A query block starts at a line
//! containing a trigger such as `pool.query` and ends when a parenthesis
//! heuristic says the call is closed. Numbering restarts for every block.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       pgparams CLI                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  core::pipeline        │  rewrite             │  core         │
//! │ • file_discovery       │ • BlockExtractor     │ • config      │
//! │ • RewritePipeline      │ • PlaceholderRewriter│ • errors      │
//! │ • RunReport            │                      │ • file_utils  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgparams::{BlockClosing, RewriteConfig, RewritePipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RewriteConfig::default()
//!         .with_target_dir("backend/src/controllers")
//!         .with_block_closing(BlockClosing::Balanced);
//!
//!     let report = RewritePipeline::new(config)?.run()?;
//!     println!("{} file(s) modified", report.summary().modified);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Configuration, errors, file I/O and the directory pipeline
pub mod core {
    //! Configuration, error handling, file I/O and pipeline orchestration.

    pub mod config;
    pub mod errors;
    pub mod file_utils;
    pub mod pipeline;
}

// Block detection and placeholder numbering
pub mod rewrite;

pub use crate::core::config::{BlockClosing, RewriteConfig};
pub use crate::core::errors::{Result, ResultExt, RewriteError};
pub use crate::core::pipeline::{FileOutcome, FileStatus, RewritePipeline, RunReport, RunSummary};
pub use crate::rewrite::{BlockExtractor, FileRewrite, PlaceholderRewriter, QueryBlock};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
