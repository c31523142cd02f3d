//! Source file discovery
//!
//! Recursive, extension-filtered walk of the workspace.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::MetricsError;

/// Enumerate source files under `root` whose extension is in `extensions`
///
/// The walk is lazy and sorted by file name, so repeated scans of the same
/// tree yield the same order. Symlinked directories are not descended into;
/// symlinked files are yielded. A root that is itself a file yields nothing.
pub fn scan<'a>(
    root: &Path,
    extensions: &'a [String],
) -> Result<impl Iterator<Item = PathBuf> + 'a, MetricsError> {
    if !root.exists() {
        return Err(MetricsError::WorkspaceNotFound(root.to_path_buf()));
    }

    let files = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable directory entry");
                None
            }
        })
        .filter(is_source_file)
        .filter(move |entry| has_extension(entry.path(), extensions))
        .map(|entry| entry.into_path());

    Ok(files)
}

fn is_source_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    extensions.iter().any(|wanted| wanted == ext)
}
