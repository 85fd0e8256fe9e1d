//! File utilities for reading and persisting source files.
//!
//! Reads are strict UTF-8: a lossy conversion would silently corrupt the
//! file once it is written back. Writes go through the [`FileWriter`] trait
//! so the pipeline can swap between an atomic temp-file-and-rename strategy,
//! a plain in-place overwrite, or a recording double in tests.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::errors::{Result, ResultExt, RewriteError};

/// Strict UTF-8 file reading
pub struct FileReader;

impl FileReader {
    /// Read a whole file as UTF-8 text
    pub fn read_to_string(file_path: &Path) -> Result<String> {
        let bytes = fs::read(file_path)
            .map_err(|e| RewriteError::io_at("Failed to read file", file_path, e))?;

        String::from_utf8(bytes).map_err(|e| RewriteError::encoding(file_path, e))
    }

    /// Check whether a file name ends with the given suffix
    pub fn has_extension(file_path: &Path, extension: &str) -> bool {
        file_path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(extension))
    }
}

/// Strategy for persisting rewritten file content.
pub trait FileWriter {
    /// Replace the contents of `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Truncates the target and writes the new content directly.
///
/// A failure part-way through can leave the file partially written.
#[derive(Debug, Default, Clone, Copy)]
pub struct InPlaceFileWriter;

impl FileWriter for InPlaceFileWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| RewriteError::io_at("Failed to write file", path, e))
    }
}

/// Writes to a temp file next to the target, then renames it into place.
///
/// The target is either fully replaced or left untouched. The original
/// file permissions are carried over to the replacement. When `path` is a
/// symlink, the file it points to is replaced and the link is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicFileWriter;

impl FileWriter for AtomicFileWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Replace the link target, not the link itself.
        let resolved = fs::canonicalize(path).ok();
        let path = resolved.as_deref().unwrap_or(path);

        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| {
            RewriteError::io_at("Failed to create temp file in", parent_dir, e)
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .and_then(|()| temp_file.as_file().sync_all())
            .map_err(|e| RewriteError::io_at("Failed to write temp file for", path, e))?;

        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp_file.path(), metadata.permissions()).at_path(path)?;
        }

        temp_file
            .persist(path)
            .map_err(|e| RewriteError::io_at("Failed to persist temp file to", path, e.error))?;

        debug!("Atomically replaced {}", path.display());
        Ok(())
    }
}

/// Pick the writer matching the `atomic_writes` setting.
pub fn writer_for(atomic: bool) -> Box<dyn FileWriter> {
    if atomic {
        Box::new(AtomicFileWriter)
    } else {
        Box::new(InPlaceFileWriter)
    }
}
