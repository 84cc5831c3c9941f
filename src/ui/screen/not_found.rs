use super::Screen;
use crate::{
    catalog::ContentId,
    ui::{greyscale, AppState, BOLD_FONT},
};
use iced::widget::{center, column, text};
use std::time::Instant;

/// Terminal screen for a watch route whose title is not in the catalog.
pub struct NotFound {
    id: ContentId,
}

impl NotFound {
    pub fn new(id: ContentId) -> Self {
        NotFound { id }
    }
}

#[derive(Debug, Clone)]
pub enum NotFoundMessage {}

impl Screen for NotFound {
    type Message = NotFoundMessage;

    fn update(
        &mut self,
        message: NotFoundMessage,
        _state: &mut AppState,
        _now: Instant,
    ) -> iced::Task<NotFoundMessage> {
        match message {}
    }

    fn view<'a, 'b>(&'a self, _state: &'a AppState) -> iced::Element<'b, NotFoundMessage>
    where
        'a: 'b,
    {
        center(
            column![]
                .spacing(8.0)
                .align_x(iced::Alignment::Center)
                .push(text("Title not found").font(BOLD_FONT).size(32.0))
                .push(text(format!("No title with id {}", self.id)).color(greyscale(140))),
        )
        .style(|_| iced::widget::container::Style {
            background: Some(iced::Background::Color(iced::Color::BLACK)),
            ..Default::default()
        })
        .into()
    }
}
