mod common;

use common::*;
use image::GenericImageView;

fn run(width: u32, height: u32) -> Cartoon {
    let (_dir, path) = write_test_image(width, height, "input.png");
    Cartoonifier::new(&path, CartoonParams::default())
        .expect("Failed to load test image")
        .run()
        .expect("Run failed")
}

#[test]
fn test_six_previews_at_preview_scale() {
    let cartoon = run(320, 200);
    assert_eq!(cartoon.scale, PreviewScale { width: 960, height: 600 });
    assert_eq!(cartoon.previews.len(), 6);
    for stage in &cartoon.previews {
        assert_eq!(stage.image.dimensions(), (960, 600), "stage {}", stage.name);
    }
    let names: Vec<&str> = cartoon.previews.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Original",
            "Grayscale",
            "Median Blur",
            "Adaptive Threshold",
            "Bilateral Filter",
            "Cartoon"
        ]
    );
}

#[test]
fn test_full_resolution_keeps_source_size() {
    let cartoon = run(320, 200);
    assert_eq!(cartoon.full_resolution.dimensions(), (320, 200));
    assert_eq!(cartoon.final_image().dimensions(), (960, 600));
    assert_eq!(cartoon.image_for(SaveResolution::Full).dimensions(), (320, 200));
}

#[test]
fn test_gray_stages_have_one_channel() {
    let cartoon = run(120, 90);
    for stage in &cartoon.previews[1..=3] {
        assert_eq!(stage.image.color().channel_count(), 1, "stage {}", stage.name);
    }
    assert_eq!(cartoon.previews[0].image.color().channel_count(), 3);
    assert_eq!(cartoon.previews[5].image.color().channel_count(), 3);
}

#[test]
fn test_edge_preview_stays_binary() {
    let cartoon = run(150, 100);
    let edges = cartoon.previews[3].image.to_luma8();
    assert!(edges.pixels().all(|p| p[0] == 0 || p[0] == 255));
    // The square's border must produce some edge pixels
    assert!(edges.pixels().any(|p| p[0] == 0));
    assert!(edges.pixels().any(|p| p[0] == 255));
}

#[test]
fn test_cartoon_is_bilateral_under_mask() {
    let (_dir, path) = write_test_image(90, 60, "input.png");
    let cartoonifier = Cartoonifier::new(&path, CartoonParams::default()).unwrap();
    let pipeline = cartoonify::build_cartoon_pipeline(&cartoonifier.params());
    let run = pipeline.run(cartoonifier.original().clone()).unwrap();

    let mask = run.output.mask.as_ref().expect("mask should be set").clone();
    let bilateral = run.stages[4].stage.image.to_rgb8();
    let cartoon = run.output.image.to_rgb8();
    for (x, y, pixel) in cartoon.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] == 0 {
            assert_eq!(pixel.0, [0, 0, 0]);
        } else {
            assert_eq!(pixel, bilateral.get_pixel(x, y));
        }
    }
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.jpg");
    let result = Cartoonifier::new(&missing, CartoonParams::default());
    assert!(matches!(result, Err(Error::ImageLoad { .. })));
    assert!(list_files(dir.path()).is_empty());
}

#[test]
fn test_garbage_file_is_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    assert!(matches!(
        Cartoonifier::new(&path, CartoonParams::default()),
        Err(Error::ImageLoad { .. })
    ));
}

#[test]
fn test_debug_out_writes_every_stage() {
    let (dir, path) = write_test_image(60, 40, "input.png");
    let debug_dir = dir.path().join("debug");
    Cartoonifier::new(&path, CartoonParams::new(11, 5).unwrap())
        .unwrap()
        .with_debug(debug_dir.clone())
        .run()
        .unwrap();

    assert_eq!(
        list_files(&debug_dir),
        vec![
            "00_input",
            "01_grayscale",
            "02_median_blur",
            "03_adaptive_threshold",
            "04_bilateral_filter",
            "05_cartoon",
            "previews"
        ]
    );
    assert_eq!(list_files(&debug_dir.join("previews")).len(), 6);
}

#[test]
fn test_full_hd_photo_end_to_end() {
    let (dir, path) = write_test_image(1920, 1080, "photo.png");
    let cartoonifier = Cartoonifier::new(&path, CartoonParams::new(31, 7).unwrap()).unwrap();
    assert_eq!(cartoonifier.scale().dimensions(), (960, 540));

    let cartoon = cartoonifier.run().unwrap();
    assert_eq!(cartoon.previews.len(), 6);
    assert!(cartoon.previews.iter().all(|s| s.image.dimensions() == (960, 540)));

    let saved = cartoonify::save_cartoon(&cartoon, &path, SaveResolution::Preview).unwrap();
    assert_eq!(saved, dir.path().join("photo_cartoonified.png"));
    let reloaded = image::open(&saved).unwrap();
    assert_eq!(reloaded.dimensions(), (960, 540));
}
