pub mod form;
pub mod preview;
pub mod stages;

use iced::{
    Element,
    widget::{container, text},
};

use crate::gui::{AppState, Message};

/// Which page the window is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenData {
    Form,
    Working,
    SourcePreview,
    FinalPreview,
    Stages,
}

impl ScreenData {
    pub fn view<'a>(&self, state: &'a AppState) -> Element<'a, Message> {
        match (self, state.result.as_ref()) {
            (ScreenData::Form, _) => form::view(state),
            (ScreenData::Working, _) => container(text("Cartoonifying..."))
                .center_x(iced::Length::Fill)
                .center_y(iced::Length::Fill)
                .into(),
            (ScreenData::SourcePreview, Some(output)) => preview::view(
                "Original image",
                output.source_preview(),
                ScreenData::FinalPreview,
            ),
            (ScreenData::FinalPreview, Some(output)) => preview::view(
                "Final image",
                output.final_preview(),
                ScreenData::Stages,
            ),
            (ScreenData::Stages, Some(output)) => stages::view(state, output),
            // Nothing to preview yet
            (_, None) => form::view(state),
        }
    }
}
