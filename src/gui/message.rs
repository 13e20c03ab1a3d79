use std::path::PathBuf;

use crate::gui::{screens::ScreenData, state::RunOutput};
use crate::models::SaveResolution;

#[derive(Debug, Clone)]
pub enum Message {
    ChooseImage,
    ImageChosen(Option<PathBuf>),
    BlockSizeChanged(String),
    OffsetChanged(String),
    Start,
    Finished(Result<RunOutput, String>),
    ChangeScreen(ScreenData),
    Save(SaveResolution),
    Saved(Result<PathBuf, String>),
    DialogClosed,
}
