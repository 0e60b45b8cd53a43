use crate::classify::FileClass;
use crate::convert::{ConversionTarget, convert_file};
use crate::display_relative;
use crate::enumerate::list_directory;
use crate::progress::Reporter;
use crate::statistics::{FileOutcome, RunStatistics};

use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Mirrors every directory below `source_root` into `destination_root` and converts each eligible file on the way.
///
/// Per-file failures are logged and counted; only structural problems (unreadable directories, directories that
/// cannot be created, symlink cycles) abort the walk. The progress total starts at whatever the reporter already
/// holds and grows as directories are listed.
pub fn mirror_tree(source_root: &Path, destination_root: &Path, target: ConversionTarget, reporter: &Reporter) -> anyhow::Result<RunStatistics> {
    fs::create_dir_all(destination_root).with_context(|| format!("Failed to create {}", destination_root.display()))?;
    let destination_root_canonical = destination_root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", destination_root.display()))?;

    let mut statistics = RunStatistics::new();
    statistics.total_files = reporter.total();

    let mut walk = TreeWalk {
        source_root,
        destination_root_canonical,
        target,
        reporter,
        statistics,
        discovered_files: 0,
        ancestors: Vec::new(),
    };

    walk.mirror_directory(source_root, destination_root)?;

    Ok(walk.statistics)
}

struct TreeWalk<'a> {
    source_root: &'a Path,
    destination_root_canonical: PathBuf,
    target: ConversionTarget,
    reporter: &'a Reporter,
    statistics: RunStatistics,
    discovered_files: u64,
    /// Canonical paths of the directories currently being descended.
    ancestors: Vec<PathBuf>,
}

impl TreeWalk<'_> {
    fn mirror_directory(&mut self, source_directory: &Path, destination_directory: &Path) -> anyhow::Result<()> {
        let canonical = source_directory
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", source_directory.display()))?;

        if self.ancestors.contains(&canonical) {
            anyhow::bail!(
                "Symlink cycle detected: {} points back to {}",
                source_directory.display(),
                canonical.display()
            );
        }

        if canonical == self.destination_root_canonical {
            log::warn!("Not descending into the destination directory {}", source_directory.display());
            return Ok(());
        }

        let listing = list_directory(source_directory)?;

        fs::create_dir_all(destination_directory).with_context(|| format!("Failed to create {}", destination_directory.display()))?;

        self.discovered_files += listing.files.len() as u64;
        self.statistics.total_files = self.statistics.total_files.max(self.discovered_files);
        self.reporter.reveal_total(self.statistics.total_files);

        let mut written_outputs = HashMap::new();
        for (source, class) in &listing.files {
            self.convert_one(source, *class, destination_directory, &mut written_outputs);
        }

        self.ancestors.push(canonical);
        for subdirectory in &listing.subdirectories {
            let Some(name) = subdirectory.file_name() else {
                continue;
            };
            self.mirror_directory(subdirectory, &destination_directory.join(name))?;
        }
        self.ancestors.pop();

        Ok(())
    }

    fn convert_one(&mut self, source: &Path, class: FileClass, destination_directory: &Path, written_outputs: &mut HashMap<PathBuf, PathBuf>) {
        let source_name = display_relative(source, self.source_root);

        match convert_file(self.target, source, class, destination_directory) {
            Ok(conversion) => {
                log::debug!("{:?}: {} ==> {}", conversion.outcome, source_name, conversion.output.display());

                if let Some(previous) = written_outputs.insert(conversion.output.clone(), source.to_path_buf()) {
                    self.reporter.suspend(|| {
                        log::warn!(
                            "{} overwrote the output of {}: {}",
                            source_name,
                            display_relative(&previous, self.source_root),
                            conversion.output.display()
                        )
                    });
                }

                self.statistics.record(conversion.outcome);
            }
            Err(error) => {
                self.statistics.record(FileOutcome::Failed);
                self.reporter.suspend(|| log::warn!("Error processing {}: {:#}", source_name, error));
            }
        }

        self.reporter.advance(&self.statistics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Not;

    #[test]
    fn empty_source_produces_an_empty_destination() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("sources");
        let destination = root.path().join("assets");
        fs::create_dir(&source).unwrap();

        let statistics = mirror_tree(&source, &destination, ConversionTarget::Placeholder, &Reporter::hidden()).unwrap();

        assert_eq!(statistics.processed_files, 0);
        assert_eq!(statistics.total_files, 0);
        assert!(destination.is_dir());
    }

    #[test]
    fn directories_are_mirrored_even_without_eligible_files() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("sources");
        let destination = root.path().join("assets");
        fs::create_dir_all(source.join("a/b")).unwrap();
        fs::write(source.join("a/b/notes.txt"), b"ignored").unwrap();

        mirror_tree(&source, &destination, ConversionTarget::Placeholder, &Reporter::hidden()).unwrap();

        assert!(destination.join("a/b").is_dir());
        assert!(destination.join("a/b/notes.txt").exists().not());
    }

    #[test]
    fn colliding_stems_leave_a_single_output() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("sources");
        let destination = root.path().join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("logo.jpg"), b"whatever").unwrap();
        fs::write(source.join("logo.png"), b"whatever").unwrap();

        let statistics = mirror_tree(&source, &destination, ConversionTarget::Placeholder, &Reporter::hidden()).unwrap();

        assert_eq!(statistics.converted_files, 2);
        assert_eq!(fs::read_dir(&destination).unwrap().count(), 1);
        assert!(destination.join("logo.svg").is_file());
    }

    #[test]
    fn destination_nested_in_source_is_not_walked() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("sources");
        let destination = source.join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("logo.png"), b"whatever").unwrap();

        let first = mirror_tree(&source, &destination, ConversionTarget::Placeholder, &Reporter::hidden()).unwrap();
        let second = mirror_tree(&source, &destination, ConversionTarget::Placeholder, &Reporter::hidden()).unwrap();

        assert_eq!(first.processed_files, 1);
        assert_eq!(second.processed_files, 1);
    }
}
