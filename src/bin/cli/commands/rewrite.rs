//! The `rewrite` command.

use tracing::info;

use pgparams::RewritePipeline;

use crate::cli::args::{OutputFormat, RewriteArgs};
use crate::cli::config_layer::build_layered_config;
use crate::cli::output::{print_completion, print_file_outcome, render_json};

/// Run the placeholder migration over the configured directory.
pub fn rewrite_command(args: RewriteArgs) -> anyhow::Result<()> {
    let config = build_layered_config(&args)?;
    info!("Target directory: {}", config.target_dir.display());

    let dry_run = config.dry_run;
    let pipeline = RewritePipeline::new(config)?;

    let report = match args.format {
        OutputFormat::Pretty => {
            let report = pipeline.run_with(|outcome| print_file_outcome(outcome, dry_run))?;
            print_completion(&report);
            report
        }
        OutputFormat::Json => {
            let report = pipeline.run()?;
            println!("{}", render_json(&report)?);
            report
        }
    };

    if report.has_failures() {
        anyhow::bail!(
            "{} file(s) could not be processed",
            report.summary().failed
        );
    }

    Ok(())
}
