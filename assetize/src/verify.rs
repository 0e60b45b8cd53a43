use crate::classify::lowercase_extension;
use crate::display_relative;
use crate::enumerate::describe_walk_error;
use crate::statistics::VerifyStatistics;

use image::{ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use std::ops::Not;
use std::path::Path;
use walkdir::WalkDir;

/// The one format every file of a verified tree must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedFormat {
    Svg,
    Webp,
}

impl ExpectedFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExpectedFormat::Svg => "SVG",
            ExpectedFormat::Webp => "WebP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExpectedFormat::Svg => "svg",
            ExpectedFormat::Webp => "webp",
        }
    }

    /// Shallow structural check, not a conformance test.
    pub fn validate(self, contents: &[u8]) -> bool {
        match self {
            ExpectedFormat::Svg => {
                let text = String::from_utf8_lossy(contents);
                text.contains("<svg") && text.contains("</svg>")
            }
            ExpectedFormat::Webp => ImageReader::new(Cursor::new(contents))
                .with_guessed_format()
                .ok()
                .filter(|reader| reader.format() == Some(ImageFormat::WebP))
                .and_then(|reader| reader.into_dimensions().ok())
                .is_some(),
        }
    }
}

/// Audits every file below `root`. Nothing is modified. Wrong extensions and invalid contents are counted, while
/// failing to walk the tree at all is an error.
pub fn verify_tree(root: &Path, format: ExpectedFormat) -> anyhow::Result<VerifyStatistics> {
    if root.is_dir().not() {
        anyhow::bail!("Directory not found: {}", root.display());
    }

    let mut statistics = VerifyStatistics::default();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|error| describe_walk_error(root, error))?;
        let relative_path = display_relative(entry.path(), root);

        if entry.file_type().is_dir() {
            if entry.depth() == 0 {
                log::info!("Verifying directory: {}", root.display());
            } else {
                statistics.directories += 1;
                log::info!("Verifying directory: {}", relative_path);
            }
            continue;
        }

        statistics.total_files += 1;

        if lowercase_extension(entry.path()).as_deref() != Some(format.extension()) {
            statistics.mismatched_files += 1;
            log::error!("Non-{} file found: {}", format.name(), relative_path);
            continue;
        }

        statistics.matching_files += 1;

        match fs::read(entry.path()) {
            Ok(contents) if format.validate(&contents) => {}
            Ok(_) => {
                statistics.invalid_files += 1;
                log::warn!("{} might not be a valid {} file", relative_path, format.name());
            }
            Err(error) => {
                statistics.invalid_files += 1;
                log::warn!("Error reading file {}: {}", relative_path, error);
            }
        }
    }

    Ok(statistics)
}

/// Wrong extensions always fail the verification; invalid contents only in strict mode.
pub fn verification_passed(statistics: &VerifyStatistics, strict: bool) -> bool {
    statistics.mismatched_files == 0 && (strict.not() || statistics.invalid_files == 0)
}

pub fn print_verify_summary(statistics: &VerifyStatistics, format: ExpectedFormat) {
    println!();
    println!("==============================");
    println!("Total directories: {}", statistics.directories);
    println!("Total files:       {}", statistics.total_files);
    println!("Expected format:   {}", format.name());
    println!("Matching files:    {}", statistics.matching_files);
    println!("Mismatched files:  {}", statistics.mismatched_files);
    println!("Invalid contents:  {}", statistics.invalid_files);
    println!("==============================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_needs_opening_and_closing_tags() {
        assert!(ExpectedFormat::Svg.validate(b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>"));
        assert!(ExpectedFormat::Svg.validate(b"<?xml version=\"1.0\"?>\n<svg>\n</svg>\n"));
        assert!(ExpectedFormat::Svg.validate(b"<svg>").not());
        assert!(ExpectedFormat::Svg.validate(b"</svg>").not());
        assert!(ExpectedFormat::Svg.validate(b"\x89PNG\r\n\x1a\n").not());
    }

    #[test]
    fn webp_needs_a_readable_webp_header() {
        let mut encoded = Vec::new();
        image::RgbaImage::from_pixel(4, 3, image::Rgba([1, 2, 3, 255]))
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::WebP)
            .unwrap();

        assert!(ExpectedFormat::Webp.validate(&encoded));
        assert!(ExpectedFormat::Webp.validate(b"RIFF\x00\x00\x00\x00WEBPVP8 ").not());
        assert!(ExpectedFormat::Webp.validate(b"<svg></svg>").not());
    }

    #[test]
    fn counts_mismatches_and_invalid_contents_separately() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        fs::write(root.path().join("a/good.svg"), b"<svg></svg>").unwrap();
        fs::write(root.path().join("a/b/LOUD.SVG"), b"<svg></svg>").unwrap();
        fs::write(root.path().join("a/b/empty.svg"), b"").unwrap();
        fs::write(root.path().join("a/stray.png"), b"png").unwrap();

        let statistics = verify_tree(root.path(), ExpectedFormat::Svg).unwrap();

        assert_eq!(statistics.directories, 2);
        assert_eq!(statistics.total_files, 4);
        assert_eq!(statistics.matching_files, 3);
        assert_eq!(statistics.mismatched_files, 1);
        assert_eq!(statistics.invalid_files, 1);
        assert!(verification_passed(&statistics, false).not());
    }

    #[test]
    fn invalid_contents_only_fail_strict_verification() {
        let statistics = VerifyStatistics {
            directories: 1,
            total_files: 2,
            matching_files: 2,
            mismatched_files: 0,
            invalid_files: 1,
        };

        assert!(verification_passed(&statistics, false));
        assert!(verification_passed(&statistics, true).not());
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();

        assert!(verify_tree(&root.path().join("assets"), ExpectedFormat::Webp).is_err());
    }
}
