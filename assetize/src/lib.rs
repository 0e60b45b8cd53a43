#![forbid(unsafe_code)]

use crate::enumerate::count_eligible_files;
use crate::progress::print_run_summary;
use crate::verify::print_verify_summary;

use std::ops::Not;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod classify;
mod convert;
mod enumerate;
mod progress;
mod statistics;
mod verify;
mod walk;

pub use crate::classify::{ELIGIBLE_EXTENSIONS, FileClass, RasterKind, classify};
pub use crate::convert::{ConversionTarget, minify_svg};
pub use crate::progress::Reporter;
pub use crate::statistics::{FileOutcome, RunStatistics, VerifyStatistics};
pub use crate::verify::{ExpectedFormat, verification_passed, verify_tree};
pub use crate::walk::mirror_tree;

pub struct ConvertOptions {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub target: ConversionTarget,
    pub precount: bool,
}

pub struct VerifyOptions {
    pub root: PathBuf,
    pub format: ExpectedFormat,
    pub strict: bool,
}

pub fn run_convert(options: ConvertOptions) -> ExitCode {
    if options.source.is_dir().not() {
        log::error!("Source directory not found: {}", options.source.display());
        return ExitCode::FAILURE;
    }

    let reporter = if options.precount {
        log::info!("Scanning {}...", options.source.display());

        match count_eligible_files(&options.source, &options.destination) {
            Ok(total_files) => {
                log::info!("Found {} image files to process.", total_files);
                Reporter::new(total_files)
            }
            Err(error) => {
                log::error!("{:#}", error);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Reporter::new(0)
    };

    log::info!(
        "Converting {} into {} ({})",
        options.source.display(),
        options.destination.display(),
        options.target.name()
    );

    let statistics = match mirror_tree(&options.source, &options.destination, options.target, &reporter) {
        Ok(statistics) => statistics,
        Err(error) => {
            reporter.finish();
            log::error!("{:#}", error);
            return ExitCode::FAILURE;
        }
    };

    reporter.finish();
    print_run_summary(&statistics, options.target);

    if statistics.processed_files == 0 {
        log::warn!(
            "No image files were found. Make sure {} contains files with one of the extensions: {}",
            options.source.display(),
            ELIGIBLE_EXTENSIONS.join(", ")
        );
    }

    ExitCode::SUCCESS
}

pub fn run_verify(options: VerifyOptions) -> ExitCode {
    let statistics = match verify_tree(&options.root, options.format) {
        Ok(statistics) => statistics,
        Err(error) => {
            log::error!("Error during verification: {:#}", error);
            return ExitCode::FAILURE;
        }
    };

    print_verify_summary(&statistics, options.format);

    if verification_passed(&statistics, options.strict) {
        log::info!("Verification successful: all files are in {} format", options.format.name());
        ExitCode::SUCCESS
    } else if statistics.mismatched_files > 0 {
        log::error!(
            "Verification failed: {} non-{} files found in {}",
            statistics.mismatched_files,
            options.format.name(),
            options.root.display()
        );
        ExitCode::FAILURE
    } else {
        log::error!(
            "Verification failed: {} files with invalid {} contents found in {}",
            statistics.invalid_files,
            options.format.name(),
            options.root.display()
        );
        ExitCode::FAILURE
    }
}

/// `path` relative to `root` for log output, or the full path if it is not below `root`.
pub(crate) fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(|relative| relative.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}
