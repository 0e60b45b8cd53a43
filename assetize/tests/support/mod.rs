#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

pub const ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16"><circle cx="8" cy="8" r="6" fill="teal"/></svg>"#;

pub struct Workspace {
    _root: TempDir,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let source = root.path().join("sources");
        let destination = root.path().join("assets");
        fs::create_dir(&source).expect("create source dir");

        Self {
            _root: root,
            source,
            destination,
        }
    }

    /// `a/logo.png` (200x100) and `a/icon.svg`.
    pub fn with_logo_and_icon() -> Self {
        let workspace = Self::new();
        workspace.png("a/logo.png", 200, 100);
        workspace.file("a/icon.svg", ICON_SVG.as_bytes());
        workspace
    }

    pub fn file(&self, relative_path: &str, contents: &[u8]) -> PathBuf {
        let path = self.source.join(relative_path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("create parent dirs");
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn png(&self, relative_path: &str, width: u32, height: u32) -> PathBuf {
        self.image(relative_path, width, height, ImageFormat::Png)
    }

    pub fn image(&self, relative_path: &str, width: u32, height: u32, format: ImageFormat) -> PathBuf {
        let path = self.source.join(relative_path);
        fs::create_dir_all(path.parent().expect("has parent")).expect("create parent dirs");
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
            .save_with_format(&path, format)
            .expect("write image");
        path
    }
}

/// Relative path => contents of every file below `root`.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("walk"))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).expect("below root").to_path_buf();
            let contents = fs::read(entry.path()).expect("read output");
            (relative, contents)
        })
        .collect()
}
