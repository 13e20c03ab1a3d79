use iced::widget::image::Handle;
use std::path::PathBuf;
use std::sync::Arc;

use crate::models::{Cartoon, CartoonParams, Stage};

/// A pipeline stage ready to be drawn
#[derive(Debug, Clone)]
pub struct StagePreview {
    pub name: String,
    pub handle: Handle,
}

impl StagePreview {
    pub fn from_stage(stage: &Stage) -> Self {
        let rgba = stage.image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            name: stage.name.clone(),
            handle: Handle::from_rgba(width, height, rgba.into_raw()),
        }
    }
}

/// A finished run and what the window needs to show it
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub cartoon: Arc<Cartoon>,
    pub source_path: PathBuf,
    pub previews: Vec<StagePreview>,
}

impl RunOutput {
    pub fn new(cartoon: Cartoon, source_path: PathBuf) -> Self {
        let previews = cartoon.previews.iter().map(StagePreview::from_stage).collect();
        Self {
            cartoon: Arc::new(cartoon),
            source_path,
            previews,
        }
    }

    pub fn source_preview(&self) -> Option<&StagePreview> {
        self.previews.first()
    }

    pub fn final_preview(&self) -> Option<&StagePreview> {
        self.previews.last()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub image_path: Option<PathBuf>,
    pub block_size: String,
    pub offset: String,
    pub verbose: bool,
    pub running: bool,
    pub error: Option<String>,
    pub status: Option<String>,
    pub result: Option<RunOutput>,
}

impl AppState {
    pub fn new(params: CartoonParams, verbose: bool) -> Self {
        Self {
            image_path: None,
            block_size: params.block_size.to_string(),
            offset: params.offset.to_string(),
            verbose,
            running: false,
            error: None,
            status: None,
            result: None,
        }
    }

    /// Parameters currently typed into the form
    pub fn params(&self) -> crate::Result<CartoonParams> {
        CartoonParams::parse(&self.block_size, &self.offset)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CartoonParams::default(), false)
    }
}
