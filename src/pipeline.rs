use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::models::Stage;

/// Data that flows through the pipeline
#[derive(Clone)]
pub struct PipelineData {
    /// Output of the most recent step (grayscale or color)
    pub image: DynamicImage,

    /// The decoded input, shared by steps that branch off the source
    pub original: Arc<DynamicImage>,

    /// Binary edge mask, set by the thresholding step
    pub mask: Option<Arc<GrayImage>>,
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: DynamicImage) -> Self {
        let original = Arc::new(image.clone());
        Self {
            image,
            original,
            mask: None,
        }
    }

    /// Replace the working image, keeping the original and mask
    pub fn with_image(self, image: DynamicImage) -> Self {
        Self { image, ..self }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Directory name for the step at `index` (0 is the input)
    pub fn step_dir_name(index: usize, step_name: &str) -> String {
        format!("{:02}_{}", index, step_name.to_lowercase().replace(' ', "_"))
    }

    fn save(&self, index: usize, step_name: &str, image: &DynamicImage) -> Result<PathBuf> {
        let step_dir = self.output_dir.join(Self::step_dir_name(index, step_name));
        std::fs::create_dir_all(&step_dir)?;
        let output_path = step_dir.join("01.png");
        save_png(image, &output_path)?;
        Ok(output_path)
    }
}

fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform the data and return the result
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug output)
    fn name(&self) -> &str;

    /// Filter used when this step's output is scaled for display
    fn preview_filter(&self) -> FilterType {
        FilterType::Triangle
    }
}

/// A recorded step output together with how it should be previewed
#[derive(Debug, Clone)]
pub struct RecordedStage {
    pub stage: Stage,
    pub preview_filter: FilterType,
}

/// Everything a pipeline run produced
pub struct PipelineRun {
    /// Data after the last step
    pub output: PipelineData,
    /// Input followed by each step's output, in order
    pub stages: Vec<RecordedStage>,
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Log every step at info level instead of debug
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir)?;
            if entries.next().is_some() {
                return Err(Error::DebugDirNotEmpty(output_dir));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the steps in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step on `input`, recording each output
    pub fn run(&self, input: DynamicImage) -> Result<PipelineRun> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> Result<PipelineRun> {
        if let Some(debug_config) = &self.context.debug {
            let path = debug_config.save(0, "input", &input)?;
            tracing::debug!("saved debug input to {}", path.display());
        }

        let mut stages = vec![RecordedStage {
            stage: Stage {
                name: "Original".to_string(),
                image: input.clone(),
            },
            preview_filter: FilterType::Triangle,
        }];
        let mut data = PipelineData::from_image(input);

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            let step_name = step.name();
            let started = Instant::now();
            data = step.process(data, &self.context)?;

            let (width, height) = (data.image.width(), data.image.height());
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if self.context.verbose {
                tracing::info!(step = step_name, width, height, elapsed_ms, "step {} done", step_idx + 1);
            } else {
                tracing::debug!(step = step_name, width, height, elapsed_ms, "step {} done", step_idx + 1);
            }

            if let Some(debug_config) = &self.context.debug {
                let path = debug_config.save(step_idx + 1, step_name, &data.image)?;
                tracing::debug!("saved debug output to {}", path.display());
            }

            stages.push(RecordedStage {
                stage: Stage {
                    name: step_name.to_string(),
                    image: data.image.clone(),
                },
                preview_filter: step.preview_filter(),
            });
        }

        Ok(PipelineRun {
            output: data,
            stages,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InvertStep;

    impl PipelineStep for InvertStep {
        fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
            let mut image = data.image.clone();
            image.invert();
            Ok(data.with_image(image))
        }

        fn name(&self) -> &str {
            "Invert"
        }
    }

    #[test]
    fn test_run_records_input_and_every_step() {
        let pipeline = Pipeline::new()
            .add_step_boxed(Box::new(InvertStep))
            .add_step_boxed(Box::new(InvertStep));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.step_names(), vec!["Invert", "Invert"]);

        let run = pipeline.run(DynamicImage::new_luma8(3, 3)).unwrap();
        assert_eq!(run.stages.len(), 3);
        assert_eq!(run.stages[0].stage.name, "Original");
        assert_eq!(run.stages[1].stage.image.to_luma8().get_pixel(0, 0)[0], 255);
        assert_eq!(run.output.image.to_luma8().get_pixel(0, 0)[0], 0);
        // The original is never touched by the steps
        assert_eq!(run.output.original.to_luma8().get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_run_partial_stops_early() {
        let pipeline = Pipeline::new()
            .add_step_boxed(Box::new(InvertStep))
            .add_step_boxed(Box::new(InvertStep));
        let run = pipeline.run_partial(DynamicImage::new_luma8(2, 2), 1).unwrap();
        assert_eq!(run.stages.len(), 2);
        assert_eq!(run.output.image.to_luma8().get_pixel(1, 1)[0], 255);
    }

    #[test]
    fn test_debug_dir_must_be_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("stale.txt"), b"x").unwrap();
        assert!(matches!(
            Pipeline::new().with_debug(dir.path().to_path_buf()),
            Err(Error::DebugDirNotEmpty(_))
        ));
    }

    #[test]
    fn test_debug_outputs_are_written() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("debug");
        let pipeline = Pipeline::new()
            .with_debug(out.clone())
            .unwrap()
            .add_step_boxed(Box::new(InvertStep));
        pipeline.run(DynamicImage::new_rgb8(4, 4)).unwrap();

        assert!(out.join("00_input/01.png").exists());
        assert!(out.join("01_invert/01.png").exists());
    }
}
