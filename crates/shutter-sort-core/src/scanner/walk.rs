use crate::error::Error;
use glob::Pattern;
use std::io;
use std::path::{Path, PathBuf};
use tracing::error;
use walkdir::WalkDir;

/// Extensions accepted when scanning an unsorted source tree.
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Extensions accepted when rescanning the sorted output tree, where
/// every relocated photo was renamed to `.jpg`.
pub const SORTED_EXTENSIONS: &[&str] = &["jpg"];

/// Recursive traversal collecting photo files by extension
/// (case-insensitive), pruning subtrees matched by the ignore globs.
/// Entries come back in file-name order so downstream processing is
/// deterministic. Traversal errors are fatal.
pub fn collect_photos(
    root: &Path,
    extensions: &[&str],
    ignore_globs: &[String],
) -> Result<Vec<PathBuf>, Error> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut photos = Vec::new();

    let walker = WalkDir::new(root).sort_by_file_name().into_iter();
    for entry in walker.filter_entry(|e| {
        !ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(e.path()))
    }) {
        let entry = entry.map_err(|err| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("Error walking {}: {}", root.display(), err),
            )
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if matches_extension(entry.path(), extensions) {
            photos.push(entry.into_path());
        }
    }

    Ok(photos)
}

fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
