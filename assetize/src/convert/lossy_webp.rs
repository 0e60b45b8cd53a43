use anyhow::Context;
use image::{DynamicImage, ImageReader};
use std::path::Path;

const QUALITY: f32 = 95.0;
const EFFORT: i32 = 6;

/// Lossy WebP at quality 95, method 6, with plain 4:2:0 chroma subsampling.
pub fn encode_webp(source: &Path) -> anyhow::Result<Vec<u8>> {
    let image = ImageReader::open(source)
        .context("Failed to open source")?
        .with_guessed_format()
        .context("Failed to detect image format")?
        .decode()
        .context("Failed to decode image")?;

    // the encoder only accepts 8-bit RGB(A)
    let image = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    };

    let encoder = webp::Encoder::from_image(&image).map_err(|error| anyhow::anyhow!("Unsupported pixel layout: {}", error))?;

    let mut config = webp::WebPConfig::new().map_err(|_| anyhow::anyhow!("Failed to initialize WebP encoder configuration"))?;
    config.lossless = 0;
    config.quality = QUALITY;
    config.method = EFFORT;
    config.use_sharp_yuv = 0;

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|error| anyhow::anyhow!("Failed to encode WebP: {:?}", error))?;

    Ok(encoded.to_vec())
}
