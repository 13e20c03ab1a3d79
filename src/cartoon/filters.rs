use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use image::imageops::FilterType;
use imageproc::filter::median_filter;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Replace each pixel with the median of its (2r+1)x(2r+1) neighbourhood
pub fn median_blur(img: &GrayImage, radius: u32) -> GrayImage {
    median_filter(img, radius, radius)
}

/// Binarize against the local mean minus `offset`.
///
/// A pixel becomes 255 when it is brighter than the mean of the
/// `(2 * block_radius + 1)` square around it minus `offset`, and 0 otherwise.
/// The mean is taken over edge-replicated samples and rounded to the nearest
/// integer.
pub fn adaptive_threshold_mean(img: &GrayImage, block_radius: u32, offset: i32) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return GrayImage::new(w, h);
    }
    let sums = replicated_box_sums(img, block_radius);
    let side = 2 * block_radius as u64 + 1;
    let area = side * side;

    let mut out = GrayImage::new(w, h);
    for (src, (sum, dst)) in img.pixels().zip(sums.iter().zip(out.pixels_mut())) {
        let mean = ((sum + area / 2) / area) as i64;
        *dst = if (src[0] as i64) > mean - offset as i64 {
            Luma([255u8])
        } else {
            Luma([0u8])
        };
    }
    out
}

/// Exact window sums of a `(2r+1)` square per pixel, row-major, with
/// out-of-bounds samples replaced by the nearest edge pixel
fn replicated_box_sums(img: &GrayImage, radius: u32) -> Vec<u64> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let r = radius as i64;

    // Sum of `len` samples centred on each index, sampling through `at`
    let window_sums = |len: usize, at: &dyn Fn(usize) -> u64| -> Vec<u64> {
        let mut prefix = Vec::with_capacity(len + 2 * r as usize + 1);
        prefix.push(0u64);
        for i in -r..(len as i64 + r) {
            let idx = i.clamp(0, len as i64 - 1) as usize;
            let last = prefix[prefix.len() - 1];
            prefix.push(last + at(idx));
        }
        let span = 2 * r as usize + 1;
        (0..len).map(|i| prefix[i + span] - prefix[i]).collect()
    };

    let mut rows = vec![0u64; w * h];
    for y in 0..h {
        let row = window_sums(w, &|x| img.get_pixel(x as u32, y as u32)[0] as u64);
        rows[y * w..(y + 1) * w].copy_from_slice(&row);
    }

    let mut sums = vec![0u64; w * h];
    for x in 0..w {
        let column = window_sums(h, &|y| rows[y * w + x]);
        for (y, value) in column.into_iter().enumerate() {
            sums[y * w + x] = value;
        }
    }
    sums
}

/// Mirror `i` into `0..=max` without repeating the edge sample (`dcb|abcd|cba`)
pub fn reflect_101(i: i64, max: i64) -> i64 {
    if max == 0 {
        return 0;
    }
    let reflected = if i < 0 {
        -i
    } else if i > max {
        2 * max - i
    } else {
        i
    };
    // Windows wider than the image fall back to the edge
    reflected.clamp(0, max)
}

/// Edge-preserving smoothing of an RGB image.
///
/// Neighbours inside a disc of radius `diameter / 2` are weighted by
/// `exp(-r² / 2σs²)` for distance and `exp(-d² / 2σc²)` for colour, where `d`
/// is the sum of absolute channel differences. Samples past the border are
/// mirrored without repeating the edge pixel.
pub fn bilateral_filter(
    img: &RgbImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> RgbImage {
    let (w, h) = img.dimensions();
    let radius = (diameter / 2).max(1) as i64;

    // Spatial kernel: offsets and weights for the disc
    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let mut kernel: Vec<(i64, i64, f32)> = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            kernel.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    // Colour weights indexed by summed absolute difference (0..=765)
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let color_weights: Vec<f32> = (0..=3 * 255)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let max_x = w as i64 - 1;
    let max_y = h as i64 - 1;

    ImageBuffer::from_fn(w, h, |x, y| {
        let center = img.get_pixel(x, y);
        let mut sum = [0.0f32; 3];
        let mut weight_sum = 0.0f32;

        for &(dx, dy, space_weight) in &kernel {
            let nx = reflect_101(x as i64 + dx, max_x) as u32;
            let ny = reflect_101(y as i64 + dy, max_y) as u32;
            let neighbor = img.get_pixel(nx, ny);

            let diff: usize = (0..3)
                .map(|c| (neighbor[c] as i32 - center[c] as i32).unsigned_abs() as usize)
                .sum();
            let weight = space_weight * color_weights[diff];

            for c in 0..3 {
                sum[c] += neighbor[c] as f32 * weight;
            }
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            Rgb([
                (sum[0] / weight_sum).round().clamp(0.0, 255.0) as u8,
                (sum[1] / weight_sum).round().clamp(0.0, 255.0) as u8,
                (sum[2] / weight_sum).round().clamp(0.0, 255.0) as u8,
            ])
        } else {
            *center
        }
    })
}

/// Keep pixels where `mask` is non-zero, black out the rest
pub fn apply_mask(img: &RgbImage, mask: &GrayImage) -> RgbImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        let keep = mask
            .get_pixel_checked(x, y)
            .is_some_and(|m| m[0] != 0);
        if keep {
            *img.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// Resize to exactly `width`x`height`
pub fn resize_for_preview(
    img: &DynamicImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> DynamicImage {
    img.resize_exact(width, height, filter)
}
