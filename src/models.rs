use image::DynamicImage;
use std::fmt;

use crate::error::{Error, Result};

/// Longest side of every preview image.
pub const PREVIEW_MAX_SIDE: u32 = 960;

pub const DEFAULT_BLOCK_SIZE: u32 = 31;
pub const DEFAULT_OFFSET: i32 = 7;

/// User-tunable parameters of the adaptive threshold stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartoonParams {
    /// Side of the square neighbourhood used for the local mean (odd, > 1)
    pub block_size: u32,
    /// Constant subtracted from the local mean
    pub offset: i32,
}

impl CartoonParams {
    pub fn new(block_size: u32, offset: i32) -> Result<Self> {
        let params = Self { block_size, offset };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(Error::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }

    /// Parse the two form fields. Surrounding whitespace is ignored.
    pub fn parse(block_size: &str, offset: &str) -> Result<Self> {
        let block_size = block_size.trim();
        let offset = offset.trim();
        let block_size: u32 = block_size.parse().map_err(|_| Error::InvalidParameter {
            field: "block size",
            value: block_size.to_string(),
        })?;
        let offset: i32 = offset.parse().map_err(|_| Error::InvalidParameter {
            field: "C",
            value: offset.to_string(),
        })?;
        Self::new(block_size, offset)
    }

    /// Radius of the box window matching `block_size`
    pub fn block_radius(&self) -> u32 {
        self.block_size / 2
    }
}

impl Default for CartoonParams {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// On-screen preview size derived from the source aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewScale {
    pub width: u32,
    pub height: u32,
}

impl PreviewScale {
    /// Scale `width`x`height` so the longest side becomes 960, truncating.
    pub fn for_dimensions(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        let longest = width.max(height) as u64;
        let scale = |side: u32| -> u32 {
            ((PREVIEW_MAX_SIDE as u64 * side as u64) / longest).max(1) as u32
        };
        Ok(Self {
            width: scale(width),
            height: scale(height),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Which raster `Cartoon::image_for` hands out for saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveResolution {
    /// The preview-scaled cartoon shown on screen
    #[default]
    Preview,
    /// The cartoon at the source image's resolution
    Full,
}

/// One named pipeline output
#[derive(Clone)]
pub struct Stage {
    pub name: String,
    pub image: DynamicImage,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("color", &self.image.color())
            .finish()
    }
}

/// Result of a cartoonify run
#[derive(Clone)]
pub struct Cartoon {
    /// Original, grayscale, smoothed, edges, bilateral and cartoon, all at `scale`
    pub previews: Vec<Stage>,
    /// Masked bilateral image at the source resolution
    pub full_resolution: DynamicImage,
    pub scale: PreviewScale,
}

impl fmt::Debug for Cartoon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartoon")
            .field("previews", &self.previews)
            .field("full_width", &self.full_resolution.width())
            .field("full_height", &self.full_resolution.height())
            .field("scale", &self.scale)
            .finish()
    }
}

impl Cartoon {
    /// The preview-scaled cartoon
    pub fn final_image(&self) -> &DynamicImage {
        match self.previews.last() {
            Some(stage) => &stage.image,
            None => &self.full_resolution,
        }
    }

    pub fn image_for(&self, resolution: SaveResolution) -> &DynamicImage {
        match resolution {
            SaveResolution::Preview => self.final_image(),
            SaveResolution::Full => &self.full_resolution,
        }
    }
}
