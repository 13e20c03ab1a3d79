use image::{Rgb, RgbImage};

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::new(1920, 1080);

    // Gradient background with a few flat shapes for the thresholding to outline
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = (x * 255 / 1920) as u8;
        let g = (y * 255 / 1080) as u8;
        *pixel = Rgb([r, g, 128]);
    }
    for y in 300..700 {
        for x in 500..900 {
            img.put_pixel(x, y, Rgb([240, 200, 40]));
        }
    }
    let (cx, cy, radius) = (1400i64, 540i64, 220i64);
    for y in (cy - radius)..(cy + radius) {
        for x in (cx - radius)..(cx + radius) {
            if (x - cx).pow(2) + (y - cy).pow(2) <= radius.pow(2) {
                img.put_pixel(x as u32, y as u32, Rgb([30, 60, 160]));
            }
        }
    }

    img.save("test_image.jpg")?;
    println!("Created test_image.jpg (1920x1080 RGB)");
    Ok(())
}
