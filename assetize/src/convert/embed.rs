use super::minify::minify_svg;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose};
use image::ImageReader;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Wraps the raster's original bytes as a base64 `data:` URL in an `<image>` sized to the raster's pixel dimensions.
pub fn embed_raster(source: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(source).context("Failed to read source")?;

    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .context("Failed to detect image format")?;
    let format = reader.format().context("Unrecognized image format")?;
    let image = reader.decode().context("Failed to decode image")?;

    let wrapper = image_wrapper_svg(
        image.width(),
        image.height(),
        format.to_mime_type(),
        &general_purpose::STANDARD.encode(&bytes),
    );

    minify_svg(wrapper.as_bytes())
}

fn image_wrapper_svg(width: u32, height: u32, mime_type: &str, base64_data: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><image width="{width}" height="{height}" xlink:href="data:{mime_type};base64,{base64_data}"/></svg>"#
    )
}
