//! Target directory listing.
//!
//! Only the direct children of the target directory are considered. Entries
//! come back sorted by file name so repeated runs log in the same order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::errors::{Result, RewriteError};
use crate::core::file_utils::FileReader;

/// List the files directly inside `dir` whose name ends with `extension`.
///
/// Symlinks to regular files are included; dangling links and links to
/// directories are skipped.
///
/// A missing, unreadable or non-directory `dir` is an error; non-matching
/// entries are skipped without being opened.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(dir)
        .map_err(|e| RewriteError::io_at("Cannot access target directory", dir, e))?;
    if !metadata.is_dir() {
        return Err(RewriteError::pipeline(
            "discovery",
            format!("target is not a directory: {}", dir.display()),
        ));
    }

    let mut collected = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
            match e.into_io_error() {
                Some(io_err) => RewriteError::io_at("Failed to list target directory", &path, io_err),
                None => RewriteError::pipeline(
                    "discovery",
                    format!("failed to list {}", path.display()),
                ),
            }
        })?;

        // Symlinks are not followed by the walker; resolve them here so a
        // linked controller is processed like a regular one.
        if !entry.path().is_file() {
            debug!("Skipping non-file entry {}", entry.path().display());
            continue;
        }
        if !FileReader::has_extension(entry.path(), extension) {
            continue;
        }

        collected.push(entry.into_path());
    }

    info!(
        "Discovered {} '{}' file(s) in {}",
        collected.len(),
        extension,
        dir.display()
    );
    Ok(collected)
}
