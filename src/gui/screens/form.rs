use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, row, text, text_input},
};

use crate::gui::{AppState, Message, widgets};

const FIELD_WIDTH: f32 = 120.0;

pub fn view(state: &AppState) -> Element<'_, Message> {
    let chosen = match &state.image_path {
        Some(path) => path.display().to_string(),
        None => "No image chosen".to_string(),
    };

    let mut content = column![
        text("Cartoonify Your Image!").size(32),
        button("Choose image").on_press(Message::ChooseImage),
        text(chosen),
        row![
            text("block size:"),
            text_input("31", &state.block_size)
                .on_input(Message::BlockSizeChanged)
                .width(Length::Fixed(FIELD_WIDTH)),
        ]
        .spacing(10)
        .align_y(Center),
        row![
            text("C:"),
            text_input("7", &state.offset)
                .on_input(Message::OffsetChanged)
                .width(Length::Fixed(FIELD_WIDTH)),
        ]
        .spacing(10)
        .align_y(Center),
        button("START").on_press_maybe((!state.running).then_some(Message::Start)),
    ]
    .spacing(20)
    .padding(20)
    .align_x(Center);

    if let Some(error) = &state.error {
        content = content.push(text(error.as_str()).style(text::danger));
    }

    if state.result.is_some() {
        content = content.push(widgets::save_controls(state));
    }

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
