pub mod filters;
pub mod steps;

use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{Cartoon, CartoonParams, PreviewScale, Stage};
use crate::pipeline::Pipeline;

pub const MEDIAN_RADIUS: u32 = 2;
pub const BILATERAL_DIAMETER: u32 = 9;
pub const BILATERAL_SIGMA_COLOR: f32 = 300.0;
pub const BILATERAL_SIGMA_SPACE: f32 = 300.0;

/// Build the fixed cartoon filter sequence
pub fn build_cartoon_pipeline(params: &CartoonParams) -> Pipeline {
    use steps::*;

    Pipeline::new()
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(MedianBlurStep { radius: MEDIAN_RADIUS }))
        .add_step(Arc::new(AdaptiveThresholdStep {
            block_size: params.block_size,
            offset: params.offset,
        }))
        .add_step(Arc::new(BilateralFilterStep {
            diameter: BILATERAL_DIAMETER,
            sigma_color: BILATERAL_SIGMA_COLOR,
            sigma_space: BILATERAL_SIGMA_SPACE,
        }))
        .add_step(Arc::new(MaskStep))
}

/// Decode an image file, attaching the path to any failure
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let load_err = |source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)
}

/// Turns one image file into a cartoon
pub struct Cartoonifier {
    path: PathBuf,
    params: CartoonParams,
    original: DynamicImage,
    scale: PreviewScale,
    verbose: bool,
    debug_dir: Option<PathBuf>,
}

impl Cartoonifier {
    /// Validate `params`, decode `path` and compute the preview scale
    pub fn new<P: AsRef<Path>>(path: P, params: CartoonParams) -> Result<Self> {
        params.validate()?;
        let path = path.as_ref().to_path_buf();
        let original = load_image(&path)?;
        let scale = PreviewScale::for_dimensions(original.width(), original.height())?;
        tracing::info!(
            "loaded {} ({}x{}), preview {}x{}",
            path.display(),
            original.width(),
            original.height(),
            scale.width,
            scale.height
        );
        Ok(Self {
            path,
            params,
            original,
            scale,
            verbose: false,
            debug_dir: None,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Save every stage into `dir` while running
    pub fn with_debug(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn params(&self) -> CartoonParams {
        self.params
    }

    pub fn original(&self) -> &DynamicImage {
        &self.original
    }

    pub fn scale(&self) -> PreviewScale {
        self.scale
    }

    /// Run the filter sequence and scale every stage for display
    pub fn run(&self) -> Result<Cartoon> {
        let mut pipeline = build_cartoon_pipeline(&self.params).with_verbose(self.verbose);
        if let Some(dir) = &self.debug_dir {
            pipeline = pipeline.with_debug(dir.clone())?;
        }

        tracing::info!(
            block_size = self.params.block_size,
            offset = self.params.offset,
            "cartoonifying {}",
            self.path.display()
        );
        let run = pipeline.run(self.original.clone())?;

        let previews: Vec<Stage> = run
            .stages
            .iter()
            .map(|recorded| Stage {
                name: recorded.stage.name.clone(),
                image: filters::resize_for_preview(
                    &recorded.stage.image,
                    self.scale.width,
                    self.scale.height,
                    recorded.preview_filter,
                ),
            })
            .collect();

        if let Some(dir) = &self.debug_dir {
            save_previews(dir, &previews)?;
        }

        Ok(Cartoon {
            previews,
            full_resolution: run.output.image,
            scale: self.scale,
        })
    }
}

fn save_previews(dir: &Path, previews: &[Stage]) -> Result<()> {
    let preview_dir = dir.join("previews");
    std::fs::create_dir_all(&preview_dir)?;
    for (idx, stage) in previews.iter().enumerate() {
        let file_name = format!(
            "{:02}_{}.png",
            idx + 1,
            stage.name.to_lowercase().replace(' ', "_")
        );
        let path = preview_dir.join(file_name);
        stage
            .image
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| Error::ImageSave { path, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let pipeline = build_cartoon_pipeline(&CartoonParams::default());
        assert_eq!(
            pipeline.step_names(),
            vec![
                "Grayscale",
                "Median Blur",
                "Adaptive Threshold",
                "Bilateral Filter",
                "Cartoon"
            ]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        match load_image(&missing) {
            Err(Error::ImageLoad { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected load error, got {:?}", other.map(|i| (i.width(), i.height()))),
        }
    }

    #[test]
    fn test_new_rejects_bad_params_before_loading() {
        let result = Cartoonifier::new(
            "does-not-exist.png",
            CartoonParams { block_size: 8, offset: 7 },
        );
        assert!(matches!(result, Err(Error::InvalidBlockSize(8))));
    }
}
