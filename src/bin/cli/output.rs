//! Console and JSON rendering of rewrite reports.

use owo_colors::OwoColorize;

use pgparams::core::pipeline::{FileOutcome, FileStatus, RunReport};

/// Format the report line for a single file.
pub fn format_file_line(outcome: &FileOutcome, dry_run: bool) -> String {
    let name = outcome.file_name();
    let line = match &outcome.status {
        FileStatus::Modified => {
            let verb = if dry_run { "would be modified" } else { "modified" };
            format!(
                "✅ {name} - {verb} ({} placeholder(s) in {} block(s))",
                outcome.replacements, outcome.rewritten_blocks
            )
        }
        FileStatus::Unmodified => format!("⏭️  {name} - unchanged"),
        FileStatus::Failed(error) => format!("❌ {name} - failed: {error}"),
    };

    match outcome.unterminated_block {
        Some(start) => format!("{line} ⚠️  block at line {start} never closed, left as is"),
        None => line,
    }
}

/// Print the report line for a single file as soon as it is processed.
pub fn print_file_outcome(outcome: &FileOutcome, dry_run: bool) {
    let line = format_file_line(outcome, dry_run);
    match outcome.status {
        FileStatus::Modified => println!("{}", line.bright_green()),
        FileStatus::Unmodified => println!("{}", line.dimmed()),
        FileStatus::Failed(_) => println!("{}", line.red()),
    }
}

/// Format the completion line printed after the whole directory.
pub fn format_completion(report: &RunReport) -> String {
    let summary = report.summary();
    let mut line = format!(
        "🎉 Done: {} modified, {} unchanged",
        summary.modified, summary.unmodified
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if report.dry_run {
        line.push_str(" (dry run, nothing written)");
    }
    line
}

/// Print the completion line.
pub fn print_completion(report: &RunReport) {
    println!();
    println!("{}", format_completion(report).bright_blue().bold());
}

/// Render the whole report as pretty JSON.
pub fn render_json(report: &RunReport) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(report)?;
    value["summary"] = serde_json::to_value(report.summary())?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn modified() -> FileOutcome {
        FileOutcome {
            path: PathBuf::from("controllers/pagosController.js"),
            status: FileStatus::Modified,
            blocks: 3,
            rewritten_blocks: 2,
            replacements: 5,
            unterminated_block: None,
        }
    }

    #[test]
    fn test_format_modified_line() {
        assert_eq!(
            format_file_line(&modified(), false),
            "✅ pagosController.js - modified (5 placeholder(s) in 2 block(s))"
        );
        assert!(format_file_line(&modified(), true).contains("would be modified"));
    }

    #[test]
    fn test_format_unchanged_and_failed_lines() {
        let unchanged = FileOutcome {
            status: FileStatus::Unmodified,
            ..modified()
        };
        assert_eq!(
            format_file_line(&unchanged, false),
            "⏭️  pagosController.js - unchanged"
        );

        let failed = FileOutcome::failed(PathBuf::from("authController.js"), "denied");
        assert_eq!(
            format_file_line(&failed, false),
            "❌ authController.js - failed: denied"
        );
    }

    #[test]
    fn test_unterminated_block_stays_on_the_file_line() {
        let outcome = FileOutcome {
            status: FileStatus::Unmodified,
            unterminated_block: Some(12),
            ..modified()
        };
        let line = format_file_line(&outcome, false);

        assert_eq!(
            line,
            "⏭️  pagosController.js - unchanged ⚠️  block at line 12 never closed, left as is"
        );
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn test_completion_line() {
        let mut report = RunReport::new(Path::new("controllers"), true);
        report.files.push(modified());
        report
            .files
            .push(FileOutcome::failed(PathBuf::from("a.js"), "boom"));

        assert_eq!(
            format_completion(&report),
            "🎉 Done: 1 modified, 0 unchanged, 1 failed (dry run, nothing written)"
        );
    }

    #[test]
    fn test_render_json_includes_summary() {
        let mut report = RunReport::new(Path::new("controllers"), false);
        report.files.push(modified());

        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(json["summary"]["modified"], 1);
        assert_eq!(json["summary"]["replacements"], 5);
        assert_eq!(json["files"][0]["status"], "modified");
    }
}
