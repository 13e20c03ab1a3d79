mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::CartoonifyApp;
pub use message::Message;
pub use screens::ScreenData;
pub use state::{AppState, RunOutput, StagePreview};

use crate::models::CartoonParams;

/// Open the cartoonify window and block until it is closed
pub fn run(params: CartoonParams, verbose: bool) -> iced::Result {
    iced::application(
        move || CartoonifyApp::new(params, verbose),
        CartoonifyApp::update,
        CartoonifyApp::view,
    )
    .title(CartoonifyApp::title)
    .window_size((1000.0, 800.0))
    .run()
}
