use iced::{Element, Task};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::screens::ScreenData;
use super::{AppState, Message, RunOutput};
use crate::cartoon::Cartoonifier;
use crate::models::{Cartoon, CartoonParams, SaveResolution};
use crate::save::save_cartoon;

pub struct CartoonifyApp {
    state: AppState,
    screen: ScreenData,
}

impl CartoonifyApp {
    pub fn new(params: CartoonParams, verbose: bool) -> Self {
        Self {
            state: AppState::new(params, verbose),
            screen: ScreenData::Form,
        }
    }

    pub fn title(&self) -> String {
        "Cartoonify Your Image!".to_string()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn screen(&self) -> &ScreenData {
        &self.screen
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseImage => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Choose image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"])
                    .pick_file(),
                |handle| Message::ImageChosen(handle.map(|h| h.path().to_path_buf())),
            ),
            Message::ImageChosen(path) => {
                // Cancelling keeps whatever was chosen before
                if let Some(path) = path {
                    tracing::debug!("chose {}", path.display());
                    self.state.image_path = Some(path);
                    self.state.error = None;
                }
                Task::none()
            }
            Message::BlockSizeChanged(value) => {
                self.state.block_size = value;
                Task::none()
            }
            Message::OffsetChanged(value) => {
                self.state.offset = value;
                Task::none()
            }
            Message::Start => self.start(),
            Message::Finished(result) => {
                self.state.running = false;
                match result {
                    Ok(output) => {
                        self.state.result = Some(output);
                        self.screen = ScreenData::SourcePreview;
                    }
                    Err(err) => {
                        tracing::error!("{err}");
                        self.state.error = Some(err);
                        self.screen = ScreenData::Form;
                    }
                }
                Task::none()
            }
            Message::ChangeScreen(screen) => {
                self.screen = screen;
                Task::none()
            }
            Message::Save(resolution) => self.save(resolution),
            Message::Saved(result) => self.saved(result),
            Message::DialogClosed => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view(&self.state)
    }

    fn start(&mut self) -> Task<Message> {
        if self.state.running {
            return Task::none();
        }
        let params = match self.state.params() {
            Ok(params) => params,
            Err(err) => {
                self.state.error = Some(err.to_string());
                return Task::none();
            }
        };
        let Some(path) = self.state.image_path.clone() else {
            self.state.error = Some("Can not find any image. Choose appropriate file".to_string());
            return Task::none();
        };

        self.state.error = None;
        self.state.status = None;
        self.state.running = true;
        self.screen = ScreenData::Working;
        Task::perform(
            run_cartoonifier(path, params, self.state.verbose),
            Message::Finished,
        )
    }

    fn save(&mut self, resolution: SaveResolution) -> Task<Message> {
        let Some(output) = &self.state.result else {
            return Task::none();
        };
        self.state.status = Some("Saving...".to_string());
        Task::perform(
            write_cartoon(output.cartoon.clone(), output.source_path.clone(), resolution),
            Message::Saved,
        )
    }

    fn saved(&mut self, result: Result<PathBuf, String>) -> Task<Message> {
        match result {
            Ok(path) => {
                let message = saved_message(&path);
                self.state.status = Some(message.clone());
                Task::perform(
                    AsyncMessageDialog::new()
                        .set_level(MessageLevel::Info)
                        .set_title("Saved")
                        .set_description(message)
                        .set_buttons(MessageButtons::Ok)
                        .show(),
                    |_| Message::DialogClosed,
                )
            }
            Err(err) => {
                tracing::error!("{err}");
                self.state.status = Some(err);
                Task::none()
            }
        }
    }
}

fn saved_message(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    format!("Image saved by name {name} at {dir}")
}

/// Run the filters on a blocking thread so the window keeps redrawing
async fn run_cartoonifier(
    path: PathBuf,
    params: CartoonParams,
    verbose: bool,
) -> Result<RunOutput, String> {
    tokio::task::spawn_blocking(move || {
        let cartoonifier = Cartoonifier::new(&path, params)?.with_verbose(verbose);
        let cartoon = cartoonifier.run()?;
        Ok::<_, crate::Error>(RunOutput::new(cartoon, path))
    })
    .await
    .map_err(|e| e.to_string())?
    .map_err(|e| e.to_string())
}

/// Encode and write the cartoon off the UI thread
async fn write_cartoon(
    cartoon: Arc<Cartoon>,
    source_path: PathBuf,
    resolution: SaveResolution,
) -> Result<PathBuf, String> {
    tokio::task::spawn_blocking(move || save_cartoon(&cartoon, &source_path, resolution))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreviewScale, Stage};
    use image::DynamicImage;

    fn fake_output() -> RunOutput {
        let stage = |name: &str| Stage {
            name: name.to_string(),
            image: DynamicImage::new_rgb8(4, 2),
        };
        let cartoon = Cartoon {
            previews: vec![stage("Original"), stage("Cartoon")],
            full_resolution: DynamicImage::new_rgb8(8, 4),
            scale: PreviewScale { width: 4, height: 2 },
        };
        RunOutput::new(cartoon, PathBuf::from("photo.jpg"))
    }

    #[test]
    fn test_start_without_image_reports_error() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Start);
        assert!(!app.state().running);
        assert!(app.state().error.as_deref().unwrap().contains("Can not find any image"));
        assert!(matches!(app.screen(), ScreenData::Form));
    }

    #[test]
    fn test_start_with_even_block_size_reports_error() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::ImageChosen(Some(PathBuf::from("photo.jpg"))));
        let _ = app.update(Message::BlockSizeChanged("30".to_string()));
        let _ = app.update(Message::Start);
        assert!(!app.state().running);
        assert!(app.state().error.as_deref().unwrap().contains("odd"));
    }

    #[test]
    fn test_cancelled_choice_keeps_previous_path() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::ImageChosen(Some(PathBuf::from("a.png"))));
        let _ = app.update(Message::ImageChosen(None));
        assert_eq!(app.state().image_path, Some(PathBuf::from("a.png")));
    }

    #[test]
    fn test_finished_shows_source_preview() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Finished(Ok(fake_output())));
        assert!(matches!(app.screen(), ScreenData::SourcePreview));
        let output = app.state().result.as_ref().unwrap();
        assert_eq!(output.source_preview().unwrap().name, "Original");
        assert_eq!(output.final_preview().unwrap().name, "Cartoon");
    }

    #[test]
    fn test_failed_run_returns_to_form() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Finished(Err("boom".to_string())));
        assert!(matches!(app.screen(), ScreenData::Form));
        assert_eq!(app.state().error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_save_without_result_does_nothing() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Save(SaveResolution::Preview));
        assert_eq!(app.state().status, None);
    }

    #[test]
    fn test_save_marks_status_until_written() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Finished(Ok(fake_output())));
        let _ = app.update(Message::Save(SaveResolution::Full));
        assert_eq!(app.state().status.as_deref(), Some("Saving..."));
    }

    #[test]
    fn test_saved_reports_path() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Saved(Ok(PathBuf::from("/pics/photo_cartoonified.jpg"))));
        assert_eq!(
            app.state().status.as_deref(),
            Some("Image saved by name photo_cartoonified.jpg at /pics")
        );
    }

    #[test]
    fn test_failed_save_reports_error() {
        let mut app = CartoonifyApp::new(CartoonParams::default(), false);
        let _ = app.update(Message::Saved(Err("disk full".to_string())));
        assert_eq!(app.state().status.as_deref(), Some("disk full"));
    }

    #[test]
    fn test_write_cartoon_saves_beside_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("photo.png");
        let output = fake_output();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let saved = runtime
            .block_on(write_cartoon(output.cartoon.clone(), source, SaveResolution::Full))
            .unwrap();
        assert_eq!(saved, dir.path().join("photo_cartoonified.png"));
        assert!(saved.exists());
    }

    #[test]
    fn test_saved_message_names_file_and_dir() {
        let message = saved_message(Path::new("/pics/photo_cartoonified.jpg"));
        assert_eq!(message, "Image saved by name photo_cartoonified.jpg at /pics");
    }
}
