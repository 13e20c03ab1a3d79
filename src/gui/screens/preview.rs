use iced::{
    Alignment::Center,
    Element, Length,
    widget::{button, column, container, image, text},
};

use crate::gui::{Message, StagePreview, screens::ScreenData};

/// One image filling the window, with a button to move on
pub fn view<'a>(
    title: &'a str,
    preview: Option<&'a StagePreview>,
    next: ScreenData,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match preview {
        Some(preview) => image(preview.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text("Nothing to show").into(),
    };

    container(
        column![
            text(title).size(24),
            body,
            button("Continue").on_press(Message::ChangeScreen(next)),
        ]
        .spacing(10)
        .padding(20)
        .align_x(Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
