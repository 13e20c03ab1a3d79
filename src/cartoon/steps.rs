use crate::cartoon::filters;
use crate::error::{Error, Result};
use crate::models::CartoonParams;
use crate::pipeline::{PipelineContext, PipelineData, PipelineStep};
use image::DynamicImage;
use image::imageops::FilterType;
use std::sync::Arc;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = filters::to_grayscale(&data.image);
        Ok(data.with_image(DynamicImage::ImageLuma8(gray)))
    }

    fn name(&self) -> &str {
        "Grayscale"
    }
}

/// Median filter over a square neighbourhood
pub struct MedianBlurStep {
    pub radius: u32,
}

impl PipelineStep for MedianBlurStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let smoothed = filters::median_blur(&gray, self.radius);
        Ok(data.with_image(DynamicImage::ImageLuma8(smoothed)))
    }

    fn name(&self) -> &str {
        "Median Blur"
    }
}

/// Local-mean adaptive threshold; the result also becomes the edge mask
pub struct AdaptiveThresholdStep {
    pub block_size: u32,
    pub offset: i32,
}

impl PipelineStep for AdaptiveThresholdStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let params = CartoonParams::new(self.block_size, self.offset)?;
        let gray = data.image.to_luma8();
        let edges = filters::adaptive_threshold_mean(&gray, params.block_radius(), params.offset);
        let mask = Arc::new(edges.clone());
        Ok(PipelineData {
            mask: Some(mask),
            ..data.with_image(DynamicImage::ImageLuma8(edges))
        })
    }

    fn name(&self) -> &str {
        "Adaptive Threshold"
    }

    fn preview_filter(&self) -> FilterType {
        // Interpolating would bring back grey levels
        FilterType::Nearest
    }
}

/// Bilateral smoothing of the original colour image
pub struct BilateralFilterStep {
    pub diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl PipelineStep for BilateralFilterStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let rgb = data.original.to_rgb8();
        let smoothed =
            filters::bilateral_filter(&rgb, self.diameter, self.sigma_color, self.sigma_space);
        Ok(data.with_image(DynamicImage::ImageRgb8(smoothed)))
    }

    fn name(&self) -> &str {
        "Bilateral Filter"
    }
}

/// Black out every pixel outside the edge mask
pub struct MaskStep;

impl PipelineStep for MaskStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = data.mask.clone().ok_or_else(|| Error::MissingMask {
            step: self.name().to_string(),
        })?;
        let rgb = data.image.to_rgb8();
        let masked = filters::apply_mask(&rgb, &mask);
        Ok(data.with_image(DynamicImage::ImageRgb8(masked)))
    }

    fn name(&self) -> &str {
        "Cartoon"
    }
}
