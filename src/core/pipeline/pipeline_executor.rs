//! Rewrite pipeline orchestration.
//!
//! Walker → (per file) extractor → rewriter → writer → report, strictly
//! one file at a time. Each file moves through
//! `Reading → Scanning → Modified | Unmodified → Write | Skip → Done`.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::config::RewriteConfig;
use crate::core::errors::Result;
use crate::core::file_utils::{writer_for, FileReader, FileWriter};
use crate::rewrite::BlockExtractor;

use super::file_discovery::discover_files;
use super::result_types::{FileOutcome, FileStatus, RunReport};

/// Runs a rewrite pass over the configured target directory.
pub struct RewritePipeline {
    config: RewriteConfig,
    extractor: BlockExtractor,
    writer: Box<dyn FileWriter>,
}

impl std::fmt::Debug for RewritePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewritePipeline")
            .field("config", &self.config)
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

impl RewritePipeline {
    /// Validate the configuration and build a pipeline with the matching writer.
    pub fn new(config: RewriteConfig) -> Result<Self> {
        config.validate()?;
        let extractor = BlockExtractor::from_config(&config);
        let writer = writer_for(config.atomic_writes);

        Ok(Self {
            config,
            extractor,
            writer,
        })
    }

    /// Replace the file writer
    pub fn with_writer(mut self, writer: Box<dyn FileWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// Configuration the pipeline runs with
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Process every matching file of the target directory.
    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Process every matching file, calling `on_file` as each one finishes.
    ///
    /// The first read or write failure aborts the run unless
    /// `continue_on_error` is set, in which case it is recorded as a failed
    /// outcome and the next file is processed.
    pub fn run_with<F>(&self, mut on_file: F) -> Result<RunReport>
    where
        F: FnMut(&FileOutcome),
    {
        let target_dir = &self.config.target_dir;
        let files = discover_files(target_dir, &self.config.extension)?;
        let mut report = RunReport::new(target_dir, self.config.dry_run);

        info!(
            "Rewriting {} file(s) in {} ({:?} block closing{})",
            files.len(),
            target_dir.display(),
            self.config.block_closing,
            if self.config.dry_run { ", dry run" } else { "" }
        );

        for path in files {
            let outcome = match self.process_file(&path) {
                Ok(outcome) => outcome,
                Err(err) if self.config.continue_on_error => {
                    warn!("Skipping {}: {}", path.display(), err);
                    FileOutcome::failed(path, err.to_string())
                }
                Err(err) => return Err(err),
            };

            on_file(&outcome);
            report.files.push(outcome);
        }

        let summary = report.summary();
        info!(
            "Finished: {} modified, {} unchanged, {} failed, {} placeholder(s) replaced",
            summary.modified, summary.unmodified, summary.failed, summary.replacements
        );
        Ok(report)
    }

    /// Read, rewrite and conditionally persist a single file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let content = FileReader::read_to_string(path)?;
        let rewrite = self.extractor.rewrite(&content);

        let status = if rewrite.is_modified() {
            if self.config.dry_run {
                debug!("Dry run: not writing {}", path.display());
            } else {
                self.writer.write(path, &rewrite.content)?;
            }
            FileStatus::Modified
        } else {
            FileStatus::Unmodified
        };

        Ok(FileOutcome {
            path: path.to_path_buf(),
            status,
            blocks: rewrite.blocks.len(),
            rewritten_blocks: rewrite.rewritten_blocks(),
            replacements: rewrite.replacements(),
            unterminated_block: rewrite.unterminated_block,
        })
    }
}
