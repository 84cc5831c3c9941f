use super::{cards::genre_line, HomeMessage};
use crate::{
    catalog::ContentItem,
    settings::UserSettings,
    ui::{artwork, badge, greyscale, icon, light_button, round_button, BOLD_FONT},
};
use iced::widget::{button, column, container, horizontal_space, row, scrollable, stack, text};
use itertools::Itertools;

/// Casts longer than this get a trailing "more" marker.
const CAST_PREVIEW: usize = 3;

pub fn cast_line(cast: &[String]) -> String {
    let names = cast.iter().join(", ");
    if cast.len() > CAST_PREVIEW {
        format!("{} more", names)
    } else {
        names
    }
}

pub fn details_dialog<'a>(
    item: &'a ContentItem,
    settings: &UserSettings,
) -> iced::Element<'a, HomeMessage> {
    let header = stack![]
        .width(iced::Length::Fill)
        .height(380.0)
        .push(artwork(settings, &item.image_url, iced::Length::Fill, 380.0))
        .push(
            container(
                column![]
                    .spacing(18.0)
                    .push(text(item.title.to_uppercase()).font(BOLD_FONT).size(40.0))
                    .push(
                        row![]
                            .spacing(10.0)
                            .align_y(iced::Alignment::Center)
                            .push(
                                button(
                                    row![]
                                        .spacing(6.0)
                                        .align_y(iced::Alignment::Center)
                                        .push(icon(0xe037).size(24.0))
                                        .push(text("Play").font(BOLD_FONT)),
                                )
                                .on_press(HomeMessage::Play(item.id))
                                .padding(iced::Padding::new(6.0).left(20.0).right(24.0))
                                .style(light_button),
                            )
                            .push(dialog_affordance(0xe145))
                            .push(dialog_affordance(0xe8dc))
                            .push(horizontal_space())
                            .push(dialog_affordance(0xe050)),
                    ),
            )
            .padding(40.0)
            .align_y(iced::Alignment::End)
            .width(iced::Length::Fill)
            .height(iced::Length::Fill)
            .style(|_| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.0)
                        .add_stop(0.0, greyscale(24))
                        .add_stop(0.6, greyscale(24).scale_alpha(0.0)),
                ))),
                ..Default::default()
            }),
        )
        .push(
            container(
                button(icon(0xe5cd).size(22.0).align_x(iced::Alignment::Center))
                    .on_press(HomeMessage::CloseDetails)
                    .width(36.0)
                    .height(36.0)
                    .padding(6.0)
                    .style(round_button),
            )
            .padding(16.0)
            .align_x(iced::Alignment::End)
            .width(iced::Length::Fill),
        );

    let facts = row![]
        .spacing(10.0)
        .align_y(iced::Alignment::Center)
        .push(text(&item.year).color(greyscale(190)))
        .push(text(&item.duration).color(greyscale(190)))
        .push(badge(item.quality.as_str()))
        .push(badge(item.content_rating.as_str()));

    let mut credits = column![]
        .spacing(10.0)
        .width(260.0)
        .push(labelled("Cast", cast_line(&item.cast)))
        .push(
            column![]
                .spacing(4.0)
                .push(text("Genres:").size(13.0).color(greyscale(120)))
                .push(genre_line(&item.genres)),
        );
    if let Some(director) = &item.director {
        credits = credits.push(labelled("Director", director.clone()));
    }
    if !item.tags.is_empty() {
        credits = credits.push(labelled("This title is", item.tags.iter().join(", ")));
    }

    let body = row![]
        .spacing(30.0)
        .padding(iced::Padding::new(0.0).left(40.0).right(40.0).bottom(40.0))
        .push(
            column![]
                .spacing(14.0)
                .width(iced::Length::Fill)
                .push(facts)
                .push(text(&item.subtitle).font(BOLD_FONT).size(15.0))
                .push(text(&item.description).size(15.0)),
        )
        .push(credits);

    container(scrollable(column![].spacing(24.0).push(header).push(body)))
        .max_width(850.0)
        .style(|_| container::Style {
            background: Some(iced::Background::Color(greyscale(24))),
            border: iced::Border::default().rounded(6.0),
            ..Default::default()
        })
        .into()
}

fn labelled<'a>(label: &'a str, value: String) -> iced::Element<'a, HomeMessage> {
    text(format!("{}: {}", label, value))
        .size(13.0)
        .color(greyscale(200))
        .into()
}

fn dialog_affordance<'a>(codepoint: u32) -> iced::Element<'a, HomeMessage> {
    button(icon(codepoint).size(20.0).align_x(iced::Alignment::Center))
        .width(40.0)
        .height(40.0)
        .padding(8.0)
        .style(round_button)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn short_cast_is_listed_in_full() {
        assert_eq!(cast_line(&names(&["Ana", "Ben", "Cy"])), "Ana, Ben, Cy");
        assert_eq!(cast_line(&[]), "");
    }

    #[test]
    fn long_cast_gets_more_marker() {
        assert_eq!(
            cast_line(&names(&["Ana", "Ben", "Cy", "Dee", "Eve"])),
            "Ana, Ben, Cy, Dee, Eve more"
        );
    }
}
