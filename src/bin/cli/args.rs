//! CLI Argument Structures
//!
//! This module contains all CLI argument definitions and command structures
//! used by the pgparams binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rewrite `?` query placeholders into PostgreSQL `$N` parameters
#[derive(Parser)]
#[command(name = "pgparams")]
#[command(version = VERSION)]
#[command(about = "🐘 pgparams - renumber `?` query placeholders into PostgreSQL `$N` parameters")]
#[command(long_about = "
Scan a directory of controller files, find database query invocations and
rewrite their positional `?` placeholders into numbered `$1`, `$2`, … markers.
Numbering restarts for every query block. Files without changes are never written.

Common Usage:

  # Migrate the default ../src/controllers directory
  pgparams rewrite

  # Preview changes for another directory without writing
  pgparams rewrite --dry-run backend/src/controllers

  # Close blocks on balanced parentheses instead of the per-line rule
  pgparams rewrite --balanced backend/src/controllers

  # Treat `query +=` concatenations as query starts too
  pgparams rewrite --trigger pool.query --trigger 'query +='

  # Write a starter configuration file
  pgparams init-config
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite placeholders in every matching file of a directory
    Rewrite(RewriteArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a pgparams configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct RewriteArgs {
    /// Directory containing the files to rewrite [default: ../src/controllers]
    pub dir: Option<PathBuf>,

    /// Configuration file (defaults to ./.pgparams.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File name suffix of files to process [default: .js]
    #[arg(long)]
    pub extension: Option<String>,

    /// Substring marking the start of a query; repeat for several [default: pool.query]
    #[arg(long = "trigger", value_name = "TEXT")]
    pub triggers: Vec<String>,

    /// Close blocks when cumulative parentheses balance instead of per line
    #[arg(long)]
    pub balanced: bool,

    /// Overwrite files directly instead of writing a temp file and renaming
    #[arg(long)]
    pub no_atomic: bool,

    /// Record per-file failures and keep processing the directory
    #[arg(long)]
    pub keep_going: bool,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".pgparams.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Path to configuration file to validate
    #[arg(short, long, required = true)]
    pub config: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one line per file
    Pretty,
    /// Single JSON document
    Json,
}
