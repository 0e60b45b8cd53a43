use std::path::Path;

pub const ELIGIBLE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "svg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterKind {
    Png,
    Jpeg,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Svg,
    Raster(RasterKind),
}

/// Lowercase extension of the path, if it has a valid UTF-8 one.
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
}

/// Returns `None` for files the pipeline does not handle.
pub fn classify(path: &Path) -> Option<FileClass> {
    match lowercase_extension(path)?.as_str() {
        "svg" => Some(FileClass::Svg),
        "png" => Some(FileClass::Raster(RasterKind::Png)),
        "jpg" | "jpeg" => Some(FileClass::Raster(RasterKind::Jpeg)),
        "webp" => Some(FileClass::Raster(RasterKind::Webp)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_lowercase_extension() {
        assert_eq!(classify(Path::new("a/logo.PNG")), Some(FileClass::Raster(RasterKind::Png)));
        assert_eq!(classify(Path::new("photo.jpg")), Some(FileClass::Raster(RasterKind::Jpeg)));
        assert_eq!(classify(Path::new("photo.JPEG")), Some(FileClass::Raster(RasterKind::Jpeg)));
        assert_eq!(classify(Path::new("banner.webp")), Some(FileClass::Raster(RasterKind::Webp)));
        assert_eq!(classify(Path::new("icon.Svg")), Some(FileClass::Svg));
    }

    #[test]
    fn ignores_everything_else() {
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("archive.svg.gz")), None);
        assert_eq!(classify(Path::new("Makefile")), None);
        assert_eq!(classify(Path::new(".png")), None);
    }

    #[test]
    fn every_eligible_extension_is_classified() {
        for extension in ELIGIBLE_EXTENSIONS {
            let file_name = format!("file.{extension}");
            assert!(classify(Path::new(&file_name)).is_some(), "{file_name}");
        }
    }
}
