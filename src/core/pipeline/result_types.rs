//! Per-file and per-run results of a rewrite pass.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum FileStatus {
    /// At least one block was rewritten (and written unless dry run)
    Modified,
    /// No block needed rewriting; the file was not written
    Unmodified,
    /// Reading or writing failed and the run kept going
    Failed(String),
}

/// Report line for one processed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Full path of the file
    pub path: PathBuf,
    /// Outcome of processing
    #[serde(flatten)]
    pub status: FileStatus,
    /// Query blocks detected
    pub blocks: usize,
    /// Query blocks that were rewritten
    pub rewritten_blocks: usize,
    /// Placeholders replaced across the file
    pub replacements: usize,
    /// Start line of a block that never closed, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unterminated_block: Option<usize>,
}

impl FileOutcome {
    /// Outcome for a file that could not be processed
    pub fn failed(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Failed(error.into()),
            blocks: 0,
            rewritten_blocks: 0,
            replacements: 0,
            unterminated_block: None,
        }
    }

    /// File name used in console output
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            })
    }

    /// True when the file was (or in a dry run, would be) rewritten
    pub fn is_modified(&self) -> bool {
        self.status == FileStatus::Modified
    }
}

/// Aggregate counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Files processed
    pub files: usize,
    /// Files modified
    pub modified: usize,
    /// Files left unchanged
    pub unmodified: usize,
    /// Files that failed
    pub failed: usize,
    /// Placeholders replaced in total
    pub replacements: usize,
}

/// Full report of a rewrite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Directory that was processed
    pub target_dir: PathBuf,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// One entry per processed file, in processing order
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    /// Empty report for a directory
    pub fn new(target_dir: &Path, dry_run: bool) -> Self {
        Self {
            target_dir: target_dir.to_path_buf(),
            dry_run,
            files: Vec::new(),
        }
    }

    /// Count outcomes by status
    pub fn summary(&self) -> RunSummary {
        self.files
            .iter()
            .fold(RunSummary::default(), |mut summary, outcome| {
                summary.files += 1;
                summary.replacements += outcome.replacements;
                match outcome.status {
                    FileStatus::Modified => summary.modified += 1,
                    FileStatus::Unmodified => summary.unmodified += 1,
                    FileStatus::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }

    /// True when any file failed
    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|outcome| matches!(outcome.status, FileStatus::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: FileStatus, replacements: usize) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from("controllers").join(name),
            status,
            blocks: 1,
            rewritten_blocks: usize::from(replacements > 0),
            replacements,
            unterminated_block: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut report = RunReport::new(Path::new("controllers"), false);
        report.files.push(outcome("a.js", FileStatus::Modified, 3));
        report.files.push(outcome("b.js", FileStatus::Unmodified, 0));
        report.files.push(outcome("c.js", FileStatus::Modified, 2));
        report
            .files
            .push(FileOutcome::failed(PathBuf::from("d.js"), "denied"));

        let summary = report.summary();
        assert_eq!(summary.files, 4);
        assert_eq!(summary.modified, 2);
        assert_eq!(summary.unmodified, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.replacements, 5);
        assert!(report.has_failures());
    }

    #[test]
    fn test_file_name() {
        let outcome = outcome("pagosController.js", FileStatus::Unmodified, 0);
        assert_eq!(outcome.file_name(), "pagosController.js");
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(outcome("a.js", FileStatus::Modified, 2)).unwrap();
        assert_eq!(value["status"], "modified");
        assert_eq!(value["replacements"], 2);
        assert!(value.get("unterminated_block").is_none());

        let failed =
            serde_json::to_value(FileOutcome::failed(PathBuf::from("x.js"), "boom")).unwrap();
        assert_eq!(failed["status"], "failed");
        assert_eq!(failed["error"], "boom");
    }
}
