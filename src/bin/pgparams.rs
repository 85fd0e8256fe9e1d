//! pgparams CLI - positional placeholder migration
//!
//! Rewrites `?` query placeholders in a directory of controller sources into
//! the numbered `$N` parameters used by PostgreSQL drivers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays machine-readable.
    // RUST_LOG wins over --verbose when set.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rewrite(args) => cli::rewrite_command(args)?,
        Commands::PrintDefaultConfig => cli::print_default_config()?,
        Commands::InitConfig(args) => cli::init_config(args)?,
        Commands::ValidateConfig(args) => cli::validate_config(args)?,
    }

    Ok(())
}
