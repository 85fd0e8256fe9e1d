//! Configuration management commands.
//!
//! This module contains commands for managing pgparams configuration files,
//! including initialization, validation, and printing defaults.

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use pgparams::core::config::{BlockClosing, RewriteConfig};

use crate::cli::args::{InitConfigArgs, ValidateConfigArgs};
use crate::cli::config_layer::load_configuration;

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default pgparams configuration".dimmed());
    println!(
        "{}",
        "# Save this to .pgparams.yml and customize as needed".dimmed()
    );
    println!();

    let yaml_output = RewriteConfig::default().to_yaml_string()?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    RewriteConfig::default().to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Point target_dir at your controllers directory");
    println!(
        "   2. Run the migration with: {}",
        format!("pgparams rewrite --config {}", args.output.display()).cyan()
    );

    Ok(())
}

/// Row used when printing configuration settings.
#[derive(Tabled)]
struct SettingRow {
    setting: &'static str,
    value: String,
}

fn setting_rows(config: &RewriteConfig) -> Vec<SettingRow> {
    let closing = match config.block_closing {
        BlockClosing::PerLine => "per_line",
        BlockClosing::Balanced => "balanced",
    };

    vec![
        SettingRow {
            setting: "target_dir",
            value: config.target_dir.display().to_string(),
        },
        SettingRow {
            setting: "extension",
            value: config.extension.clone(),
        },
        SettingRow {
            setting: "triggers",
            value: config.triggers.join(", "),
        },
        SettingRow {
            setting: "placeholder",
            value: config.placeholder.to_string(),
        },
        SettingRow {
            setting: "token_prefix",
            value: config.token_prefix.clone(),
        },
        SettingRow {
            setting: "block_closing",
            value: closing.to_string(),
        },
        SettingRow {
            setting: "atomic_writes",
            value: config.atomic_writes.to_string(),
        },
        SettingRow {
            setting: "continue_on_error",
            value: config.continue_on_error.to_string(),
        },
        SettingRow {
            setting: "dry_run",
            value: config.dry_run.to_string(),
        },
    ]
}

/// Validate a pgparams configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)) {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • block_closing must be per_line or balanced");
            println!("   • token_prefix must not contain the placeholder");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'pgparams print-default-config' to see valid format".dimmed()
            );
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    };

    let mut table = Table::new(setting_rows(&config));
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}
