use super::HomeMessage;
use crate::{
    catalog::{ContentId, ContentItem},
    settings::UserSettings,
    ui::{artwork, badge, greyscale, icon, light_button, round_button, BOLD_FONT},
};
use iced::widget::{button, column, container, horizontal_space, mouse_area, row, text};
use itertools::Itertools;

pub const CARD_WIDTH: f32 = 240.0;
pub const CARD_HEIGHT: f32 = 135.0;

/// A card is identified by its row as well, so the same title in two rows hovers independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub row: usize,
    pub id: ContentId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardHover {
    hovered: bool,
}

impl CardHover {
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn enter(&mut self) {
        self.hovered = true;
    }

    pub fn leave(&mut self) {
        self.hovered = false;
    }
}

pub fn card<'a>(
    key: CardKey,
    item: &'a ContentItem,
    hover: CardHover,
    settings: &UserSettings,
) -> iced::Element<'a, HomeMessage> {
    let poster = container(artwork(settings, &item.image_url, CARD_WIDTH, CARD_HEIGHT))
        .clip(true)
        .style(|_| container::Style {
            border: iced::Border::default().rounded(4.0),
            ..Default::default()
        });

    let content: iced::Element<'a, HomeMessage> = if hover.is_hovered() {
        column![]
            .width(CARD_WIDTH)
            .push(poster)
            .push(
                container(expanded_info(item))
                    .width(iced::Length::Fill)
                    .padding(12.0)
                    .style(|_| container::Style {
                        background: Some(iced::Background::Color(greyscale(24))),
                        shadow: iced::Shadow {
                            color: iced::Color::BLACK.scale_alpha(0.8),
                            offset: iced::Vector::new(0.0, 4.0),
                            blur_radius: 16.0,
                        },
                        border: iced::Border::default().rounded(4.0),
                        ..Default::default()
                    }),
            )
            .into()
    } else {
        column![]
            .width(CARD_WIDTH)
            .spacing(6.0)
            .push(poster)
            .push(
                text(&item.title)
                    .size(13.0)
                    .color(greyscale(200))
                    .wrapping(text::Wrapping::None),
            )
            .into()
    };

    mouse_area(content)
        .interaction(iced::mouse::Interaction::Pointer)
        .on_enter(HomeMessage::CardEntered(key))
        .on_exit(HomeMessage::CardLeft(key))
        .into()
}

fn expanded_info(item: &ContentItem) -> iced::Element<HomeMessage> {
    column![]
        .spacing(10.0)
        .push(text(&item.title).font(BOLD_FONT).size(15.0))
        .push(
            row![]
                .spacing(8.0)
                .align_y(iced::Alignment::Center)
                .push(
                    button(icon(0xe037).size(20.0).align_x(iced::Alignment::Center))
                        .on_press(HomeMessage::Play(item.id))
                        .width(34.0)
                        .height(34.0)
                        .padding(5.0)
                        .style(|theme, status| button::Style {
                            border: iced::Border::default().rounded(17.0),
                            ..light_button(theme, status)
                        }),
                )
                .push(card_affordance(0xe145, None))
                .push(card_affordance(0xe8dc, None))
                .push(horizontal_space())
                .push(card_affordance(0xe5cf, Some(HomeMessage::OpenDetails(item.id)))),
        )
        .push(
            row![]
                .spacing(8.0)
                .align_y(iced::Alignment::Center)
                .push(
                    text(&item.rating)
                        .size(12.0)
                        .color(iced::Color::from_rgb8(70, 211, 105)),
                )
                .push(badge(item.content_type.as_str()))
                .push(badge(item.quality.as_str())),
        )
        .push(genre_line(&item.genres))
        .into()
}

fn card_affordance<'a>(codepoint: u32, on_press: Option<HomeMessage>) -> iced::Element<'a, HomeMessage> {
    button(icon(codepoint).size(18.0).align_x(iced::Alignment::Center))
        .on_press_maybe(on_press)
        .width(34.0)
        .height(34.0)
        .padding(6.0)
        .style(round_button)
        .into()
}

pub fn genre_line<'a>(genres: &[String]) -> iced::Element<'a, HomeMessage> {
    text(genres.iter().join(" • "))
        .size(12.0)
        .color(greyscale(200))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_toggles_and_cards_are_independent() {
        let mut first = CardHover::default();
        let second = CardHover::default();

        first.enter();
        assert!(first.is_hovered());
        assert!(!second.is_hovered());

        first.leave();
        assert!(!first.is_hovered());
    }

    #[test]
    fn same_title_in_two_rows_has_two_keys() {
        let a = CardKey {
            row: 0,
            id: ContentId(1),
        };
        let b = CardKey {
            row: 1,
            id: ContentId(1),
        };
        assert_ne!(a, b);
    }
}
