//! Output naming and writing.

use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{Cartoon, SaveResolution};

/// Suffix inserted before the extension of the saved file
pub const OUTPUT_SUFFIX: &str = "_cartoonified";

/// Extension used when the input has none
pub const FALLBACK_EXTENSION: &str = "png";

/// `dir/photo.jpg` -> `dir/photo_cartoonified.jpg`
///
/// The stem is everything before the last dot, so `a.b.png` becomes
/// `a.b_cartoonified.png`.
pub fn cartoonified_path(original: &Path) -> PathBuf {
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let extension = original
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    original.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{extension}"))
}

/// Write `image` to `path`, format taken from the extension
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    // JPEG has no alpha channel
    let image = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
        _ => image.clone(),
    };
    image.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("saved {}", path.display());
    Ok(())
}

/// Save `cartoon` beside `original_path` and return where it went
pub fn save_cartoon(
    cartoon: &Cartoon,
    original_path: &Path,
    resolution: SaveResolution,
) -> Result<PathBuf> {
    let path = cartoonified_path(original_path);
    save_image(cartoon.image_for(resolution), &path)?;
    Ok(path)
}
