//! Configuration Layer Management
//!
//! Configuration is resolved in three layers, later layers winning:
//! built-in defaults, then a config file (`--config` or an implicit
//! `.pgparams.yml`), then CLI flags.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::RewriteArgs;
use pgparams::core::config::{BlockClosing, RewriteConfig, IMPLICIT_CONFIG_FILES};

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another configuration into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

/// Settings explicitly requested on the command line
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliOverrides {
    pub target_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub triggers: Option<Vec<String>>,
    pub block_closing: Option<BlockClosing>,
    pub atomic_writes: Option<bool>,
    pub continue_on_error: Option<bool>,
    pub dry_run: Option<bool>,
}

impl FromCliArgs<RewriteArgs> for CliOverrides {
    fn from_cli_args(args: &RewriteArgs) -> Self {
        // Boolean flags can only switch a behavior on, so an unset flag must
        // not clobber a value coming from the config file.
        Self {
            target_dir: args.dir.clone(),
            extension: args.extension.clone(),
            triggers: (!args.triggers.is_empty()).then(|| args.triggers.clone()),
            block_closing: args.balanced.then_some(BlockClosing::Balanced),
            atomic_writes: args.no_atomic.then_some(false),
            continue_on_error: args.keep_going.then_some(true),
            dry_run: args.dry_run.then_some(true),
        }
    }
}

impl ConfigMerge<CliOverrides> for RewriteConfig {
    fn merge_with(&mut self, other: CliOverrides) {
        if let Some(dir) = other.target_dir {
            self.target_dir = dir;
        }
        if let Some(extension) = other.extension {
            self.extension = extension;
        }
        if let Some(triggers) = other.triggers {
            self.triggers = triggers;
        }
        if let Some(closing) = other.block_closing {
            self.block_closing = closing;
        }
        if let Some(atomic) = other.atomic_writes {
            self.atomic_writes = atomic;
        }
        if let Some(keep_going) = other.continue_on_error {
            self.continue_on_error = keep_going;
        }
        if let Some(dry_run) = other.dry_run {
            self.dry_run = dry_run;
        }
    }
}

/// Look for an implicit config file in `dir`.
pub fn find_implicit_config(dir: &Path) -> Option<PathBuf> {
    IMPLICIT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load a configuration file, or the defaults when none is given.
pub fn load_configuration(path: Option<&Path>) -> anyhow::Result<RewriteConfig> {
    let config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            RewriteConfig::from_yaml_file(path).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to load configuration from {}: {}",
                    path.display(),
                    e
                )
            })?
        }
        None => RewriteConfig::default(),
    };

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
    Ok(config)
}

/// Build the effective configuration for a rewrite run.
pub fn build_layered_config(args: &RewriteArgs) -> anyhow::Result<RewriteConfig> {
    let implicit = if args.config.is_none() {
        find_implicit_config(Path::new("."))
    } else {
        None
    };

    let mut config = load_configuration(args.config.as_deref().or(implicit.as_deref()))?;
    config.merge_with(CliOverrides::from_cli_args(args));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;
    Ok(config)
}
