use super::HomeMessage;
use crate::ui::{greyscale, icon, themed_button, BOLD_FONT, BRAND_RED};
use iced::widget::{button, container, horizontal_space, row, text};

/// Feed scroll offset past which the navbar turns opaque.
pub const SCROLL_THRESHOLD: f32 = 20.0;

#[inline]
pub fn is_scrolled(scroll_y: f32) -> bool {
    scroll_y > SCROLL_THRESHOLD
}

pub fn navbar<'a>(scrolled: bool) -> iced::Element<'a, HomeMessage> {
    container(
        row![]
            .spacing(22.0)
            .align_y(iced::Alignment::Center)
            .push(text("MARQUEE").font(BOLD_FONT).size(28.0).color(BRAND_RED))
            .push(nav_link("Home", true))
            .push(nav_link("TV Shows", false))
            .push(nav_link("Movies", false))
            .push(nav_link("New & Popular", false))
            .push(nav_link("My List", false))
            .push(horizontal_space())
            .push(icon(0xe8b6).size(22.0))
            .push(icon(0xe7f4).size(22.0))
            .push(
                button(text("Sign out").size(14.0))
                    .on_press(HomeMessage::SignOut)
                    .padding(iced::Padding::new(4.0).left(10.0).right(10.0))
                    .style(themed_button),
            ),
    )
    .padding(iced::Padding::new(0.0).left(48.0).right(48.0))
    .align_y(iced::Alignment::Center)
    .width(iced::Length::Fill)
    .height(68.0)
    .style(move |_| container::Style {
        background: Some(if scrolled {
            iced::Background::Color(iced::Color::from_rgb8(20, 20, 20))
        } else {
            iced::Background::Gradient(iced::Gradient::Linear(
                iced::gradient::Linear::new(0.0)
                    .add_stop(0.0, iced::Color::BLACK.scale_alpha(0.0))
                    .add_stop(1.0, iced::Color::BLACK.scale_alpha(0.7)),
            ))
        }),
        ..Default::default()
    })
    .into()
}

fn nav_link<'a>(label: &'a str, active: bool) -> iced::Element<'a, HomeMessage> {
    text(label)
        .size(14.0)
        .font(if active { BOLD_FONT } else { crate::ui::SANS_FONT })
        .color(if active {
            iced::Color::WHITE
        } else {
            greyscale(229)
        })
        .into()
}
