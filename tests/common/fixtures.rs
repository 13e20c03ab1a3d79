use image::{ImageBuffer, Rgb, RgbImage};
use std::path::PathBuf;
use tempfile::TempDir;

/// A colour gradient with a dark square in the middle, so every stage has
/// some edges to find.
pub fn gradient_with_square(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let in_square = x > width / 3 && x < 2 * width / 3 && y > height / 3 && y < 2 * height / 3;
        if in_square {
            Rgb([20u8, 30, 40])
        } else {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            Rgb([r, g, 200])
        }
    })
}

/// Writes a test image named `name` into a fresh temp directory.
/// Returns both the directory (which must be kept alive) and the image path.
pub fn write_test_image(width: u32, height: u32, name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    gradient_with_square(width, height)
        .save(&path)
        .expect("Failed to save test image");
    (dir, path)
}

/// Files in `dir`, sorted by name
pub fn list_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
