use crate::classify::{FileClass, classify};

use anyhow::Context;
use std::fs;
use std::ops::Not;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The eligible files and subdirectories directly inside one directory, each sorted by name.
#[derive(Debug, Default)]
pub struct DirectoryListing {
    pub files: Vec<(PathBuf, FileClass)>,
    pub subdirectories: Vec<PathBuf>,
}

/// Symlinks are followed. Entries whose target cannot be inspected (e.g. dangling symlinks) are skipped with a warning,
/// but failing to read the directory itself is an error.
pub fn list_directory(directory: &Path) -> anyhow::Result<DirectoryListing> {
    let entries = fs::read_dir(directory).with_context(|| format!("Failed to read directory {}", directory.display()))?;

    let mut listing = DirectoryListing::default();

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read an entry of directory {}", directory.display()))?;
        let path = entry.path();

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                log::warn!("Skipping {}: {}", path.display(), error);
                continue;
            }
        };

        if metadata.is_dir() {
            listing.subdirectories.push(path);
        } else if metadata.is_file() {
            if let Some(class) = classify(&path) {
                listing.files.push((path, class));
            }
        }
    }

    listing.files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    listing.subdirectories.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(listing)
}

/// Counts eligible files at any depth below `root`, following symlinks. A symlink cycle is an error.
///
/// `destination` is left out of the count when it lies inside `root`, the same way the walker leaves it out.
pub fn count_eligible_files(root: &Path, destination: &Path) -> anyhow::Result<u64> {
    let destination = destination.canonicalize().ok();
    let mut count = 0;

    let entries = WalkDir::new(root).follow_links(true).into_iter().filter_entry(|entry| {
        let is_destination = entry.file_type().is_dir() && destination.is_some() && entry.path().canonicalize().ok() == destination;
        is_destination.not()
    });

    for entry in entries {
        let entry = entry.map_err(|error| describe_walk_error(root, error))?;

        if entry.file_type().is_file() && classify(entry.path()).is_some() {
            count += 1;
        }
    }

    Ok(count)
}

pub(crate) fn describe_walk_error(root: &Path, error: walkdir::Error) -> anyhow::Error {
    if let Some(ancestor) = error.loop_ancestor() {
        let looping_path = error.path().map(|path| path.display().to_string()).unwrap_or_default();
        return anyhow::anyhow!("Symlink cycle detected: {} points back to {}", looping_path, ancestor.display());
    }

    anyhow::Error::new(error).context(format!("Failed to walk {}", root.display()))
}
