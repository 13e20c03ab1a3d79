use iced::{
    Alignment::Center,
    Element, Length,
    widget::{Column, Row, button, column, container, row},
};

use crate::gui::{AppState, Message, RunOutput, screens::ScreenData, widgets};

/// Stages per row in the overview grid
const COLUMNS: usize = 2;

/// Every stage side by side, three rows of two
pub fn view<'a>(state: &'a AppState, output: &'a RunOutput) -> Element<'a, Message> {
    let mut grid = Column::new().spacing(10).height(Length::Fill);
    for chunk in output.previews.chunks(COLUMNS) {
        let mut line = Row::new().spacing(10).height(Length::FillPortion(1));
        for preview in chunk {
            line = line.push(widgets::stage_tile(preview));
        }
        grid = grid.push(line);
    }

    container(
        column![
            grid,
            row![
                widgets::save_controls(state),
                button("Back").on_press(Message::ChangeScreen(ScreenData::Form)),
            ]
            .spacing(20)
            .align_y(Center),
        ]
        .spacing(10)
        .padding(10)
        .align_x(Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
