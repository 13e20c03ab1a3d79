use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, image, row, text},
};

use crate::gui::{AppState, Message, StagePreview};
use crate::models::SaveResolution;

/// A framed stage image with its name above it
pub fn stage_tile<'a>(preview: &'a StagePreview) -> Element<'a, Message> {
    container(
        column![
            text(preview.name.as_str()).size(14),
            image(preview.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .spacing(4)
        .align_x(Center),
    )
    .style(container::bordered_box)
    .padding(5)
    .width(Length::FillPortion(1))
    .height(Length::Fill)
    .into()
}

/// Save buttons plus the outcome of the last save
pub fn save_controls(state: &AppState) -> Element<'_, Message> {
    let mut controls = column![
        row![
            button("Save cartoon image").on_press(Message::Save(SaveResolution::Preview)),
            button("Save full resolution").on_press(Message::Save(SaveResolution::Full)),
        ]
        .spacing(10),
    ]
    .spacing(5)
    .align_x(Center);

    if let Some(status) = &state.status {
        controls = controls.push(text(status.as_str()).size(14));
    }

    controls.into()
}
