//! Directory-level rewrite pipeline.
//!
//! This module provides:
//! - Target directory discovery
//! - Per-file rewrite orchestration
//! - Run and file result types

pub mod file_discovery;
pub mod pipeline_executor;
pub mod result_types;


pub use file_discovery::discover_files;
pub use pipeline_executor::RewritePipeline;
pub use result_types::{FileOutcome, FileStatus, RunReport, RunSummary};
