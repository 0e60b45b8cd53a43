use crate::classify::{FileClass, RasterKind};
use crate::statistics::FileOutcome;

use anyhow::Context;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

mod embed;
mod lossy_webp;
mod minify;
mod placeholder;

pub use minify::minify_svg;

/// The single output format produced by one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionTarget {
    /// Fixed-size SVG with the file name as label. Existing SVGs are copied.
    Placeholder,
    /// Rasters embedded as base64 `<image>` inside a minified SVG. Existing SVGs are minified.
    EmbeddedSvg,
    /// Lossy WebP. Existing WebPs are copied.
    Webp,
}

impl ConversionTarget {
    pub fn name(self) -> &'static str {
        match self {
            ConversionTarget::Placeholder => "placeholder SVG",
            ConversionTarget::EmbeddedSvg => "embedded SVG",
            ConversionTarget::Webp => "WebP",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ConversionTarget::Placeholder | ConversionTarget::EmbeddedSvg => "svg",
            ConversionTarget::Webp => "webp",
        }
    }
}

#[derive(Debug)]
pub struct Conversion {
    pub output: PathBuf,
    pub outcome: FileOutcome,
}

/// `<destination_directory>/<source stem>.<target extension>`
pub fn output_path(target: ConversionTarget, source: &Path, destination_directory: &Path) -> anyhow::Result<PathBuf> {
    let stem = source
        .file_stem()
        .with_context(|| format!("{} has no file name", source.display()))?;

    let mut file_name = OsString::from(stem);
    file_name.push(".");
    file_name.push(target.extension());

    Ok(destination_directory.join(file_name))
}

/// Writes exactly one file into `destination_directory` or returns an error without writing anything.
pub fn convert_file(target: ConversionTarget, source: &Path, class: FileClass, destination_directory: &Path) -> anyhow::Result<Conversion> {
    let output = output_path(target, source, destination_directory)?;

    let outcome = match (target, class) {
        (ConversionTarget::Placeholder, FileClass::Svg) | (ConversionTarget::Webp, FileClass::Raster(RasterKind::Webp)) => {
            fs::copy(source, &output).with_context(|| format!("Failed to copy to {}", output.display()))?;
            FileOutcome::Copied
        }
        (ConversionTarget::Placeholder, FileClass::Raster(_)) => {
            let label = source.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
            write_output(&output, placeholder::placeholder_svg(&label).as_bytes())?;
            FileOutcome::Converted
        }
        (ConversionTarget::EmbeddedSvg, FileClass::Svg) => {
            let svg = fs::read(source).context("Failed to read source")?;
            write_output(&output, minify_svg(&svg)?.as_bytes())?;
            FileOutcome::Converted
        }
        (ConversionTarget::EmbeddedSvg, FileClass::Raster(_)) => {
            let svg = embed::embed_raster(source)?;
            write_output(&output, svg.as_bytes())?;
            FileOutcome::Converted
        }
        (ConversionTarget::Webp, FileClass::Svg) => {
            anyhow::bail!("SVG sources have no raster representation to encode as WebP");
        }
        (ConversionTarget::Webp, FileClass::Raster(_)) => {
            let encoded = lossy_webp::encode_webp(source)?;
            write_output(&output, &encoded)?;
            FileOutcome::Converted
        }
    };

    Ok(Conversion { output, outcome })
}

fn write_output(output: &Path, contents: &[u8]) -> anyhow::Result<()> {
    fs::write(output, contents).with_context(|| format!("Failed to write {}", output.display()))
}
