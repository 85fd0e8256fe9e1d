//! Error types for the pgparams library.
//!
//! Every fallible operation in the rewrite pipeline returns [`RewriteError`],
//! which keeps the offending path around so the CLI can report precisely
//! which file or directory stopped the run.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

/// Main result type for pgparams operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Error type for all pgparams operations.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// I/O related errors (directory listing, file reads and writes)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Path involved in the failed operation
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("Encoding error in {}: file is not valid UTF-8", path.display())]
    Encoding {
        /// File that failed to decode
        path: PathBuf,
        /// Underlying decoding error
        #[source]
        source: FromUtf8Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Validation errors for configuration values
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field that failed validation
        field: Option<String>,
    },

    /// Rewrite pipeline errors
    #[error("Pipeline error at stage '{stage}': {message}")]
    Pipeline {
        /// Pipeline stage where error occurred
        stage: String,
        /// Error description
        message: String,
    },
}

impl RewriteError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source,
        }
    }

    /// Create a new I/O error tied to a path
    pub fn io_at(message: impl Into<String>, path: &Path, source: io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", message.into(), path.display()),
            path: Some(path.to_path_buf()),
            source,
        }
    }

    /// Create a new encoding error
    pub fn encoding(path: &Path, source: FromUtf8Error) -> Self {
        Self::Encoding {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error for a named field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new pipeline error
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Path the error refers to, when one is known
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } => path.as_deref(),
            Self::Encoding { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Attach a path to an I/O error that does not carry one yet
    pub fn with_path(mut self, new_path: &Path) -> Self {
        if let Self::Io { path, message, .. } = &mut self {
            if path.is_none() {
                *message = format!("{message}: {}", new_path.display());
                *path = Some(new_path.to_path_buf());
            }
        }
        self
    }
}

impl From<io::Error> for RewriteError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_yaml::Error> for RewriteError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(format!("YAML parsing failed: {err}"))
    }
}

/// Result extension trait for attaching a path to errors
pub trait ResultExt<T> {
    /// Attach the path being processed to an error result
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RewriteError>,
{
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| e.into().with_path(path))
    }
}
