//! Configuration types and management for pgparams.
//!
//! [`RewriteConfig`] holds every knob of a migration run: where to look,
//! which lines start a query block, how blocks are closed, and how rewritten
//! files are persisted. It round-trips through YAML so a run can be pinned
//! down in a `.pgparams.yml` next to the controllers it migrates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, RewriteError};

/// Directory the migration was written against, relative to the scripts folder.
pub const DEFAULT_TARGET_DIR: &str = "../src/controllers";

/// Names of config files picked up implicitly from the working directory.
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".pgparams.yml", ".pgparams.yaml"];

/// How the end of a query block is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockClosing {
    /// A line after the trigger closes the block when it alone has more `)` than `(`
    #[default]
    PerLine,
    /// Parenthesis depth is tracked from the trigger line; the block closes at depth zero
    Balanced,
}

/// Main configuration for a rewrite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Directory whose files are rewritten (not recursed into)
    pub target_dir: PathBuf,

    /// File name suffix a file must end with to be processed
    pub extension: String,

    /// Substrings that mark the start of a query invocation
    pub triggers: Vec<String>,

    /// Generic placeholder character to replace
    pub placeholder: char,

    /// Prefix of the numbered token, e.g. `$` for `$1`
    pub token_prefix: String,

    /// Block end detection strategy
    pub block_closing: BlockClosing,

    /// Write through a temp file and rename instead of truncating in place
    pub atomic_writes: bool,

    /// Record per-file failures and keep processing the directory
    pub continue_on_error: bool,

    /// Report what would change without writing anything
    pub dry_run: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            extension: ".js".to_string(),
            triggers: vec!["pool.query".to_string()],
            placeholder: '?',
            token_prefix: "$".to_string(),
            block_closing: BlockClosing::PerLine,
            atomic_writes: true,
            continue_on_error: false,
            dry_run: false,
        }
    }
}

impl RewriteConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| RewriteError::io_at("Failed to read config file", &path, e))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(Into::into)
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = self.to_yaml_string()?;
        std::fs::write(&path, content)
            .map_err(|e| RewriteError::io_at("Failed to write config file", &path, e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(RewriteError::validation_field(
                "extension must not be empty",
                "extension",
            ));
        }

        if self.triggers.is_empty() {
            return Err(RewriteError::validation_field(
                "at least one trigger is required",
                "triggers",
            ));
        }
        if let Some(index) = self.triggers.iter().position(String::is_empty) {
            return Err(RewriteError::validation_field(
                "triggers must not be empty strings",
                format!("triggers[{index}]"),
            ));
        }

        if self.token_prefix.is_empty() {
            return Err(RewriteError::validation_field(
                "token_prefix must not be empty",
                "token_prefix",
            ));
        }

        // A digit or a prefix containing the placeholder would make rewritten
        // output match again on the next pass.
        if self.placeholder.is_ascii_digit() {
            return Err(RewriteError::validation_field(
                format!("placeholder must not be a digit, got '{}'", self.placeholder),
                "placeholder",
            ));
        }
        if self.token_prefix.contains(self.placeholder) {
            return Err(RewriteError::validation_field(
                format!(
                    "token_prefix '{}' must not contain the placeholder '{}'",
                    self.token_prefix, self.placeholder
                ),
                "token_prefix",
            ));
        }

        Ok(())
    }

    /// Set the target directory
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = dir.into();
        self
    }

    /// Set the block end detection strategy
    pub fn with_block_closing(mut self, closing: BlockClosing) -> Self {
        self.block_closing = closing;
        self
    }

    /// Replace the trigger list
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }
}
