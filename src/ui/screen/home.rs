mod cards;
mod content_row;
mod details;
mod hero;
mod navbar;

use cards::{CardHover, CardKey};
use content_row::{RowScroller, ScrollDirection};
use hero::{HeroPreview, PreviewIntent};

use super::Screen;
use crate::{
    catalog::{ContentId, ContentItem, RowGroup},
    playback::{Backend, MediaAdapter},
    settings::UserSettings,
    ui::{artwork, greyscale, icon, light_button, round_button, truncate_text, AppState, BOLD_FONT},
};
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, scrollable,
    stack, text,
};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

const HERO_HEIGHT: f32 = 560.0;
const PREVIEW_FALLBACK_SECONDS: f64 = 120.0;
const TICK_INTERVAL: Duration = Duration::from_millis(250);
const SIDE_PADDING: f32 = 48.0;

pub struct Home {
    hover: FxHashMap<CardKey, CardHover>,
    rows: Vec<RowScroller>,
    details: Option<ContentId>,
    scrolled: bool,
    hero: HeroPreview,
    preview: MediaAdapter<Backend>,
    preview_muted: bool,
}

impl Home {
    pub fn new(state: &AppState, now: Instant) -> (Self, iced::Task<HomeMessage>) {
        let seconds = state
            .catalog
            .featured()
            .and_then(ContentItem::running_time)
            .unwrap_or(PREVIEW_FALLBACK_SECONDS);

        (
            Home {
                hover: FxHashMap::default(),
                rows: (0..state.catalog.rows.len()).map(RowScroller::new).collect(),
                details: None,
                scrolled: false,
                hero: HeroPreview::new(now),
                preview: MediaAdapter::new(Backend::open(
                    state.settings.media_path.as_deref(),
                    seconds,
                )),
                preview_muted: false,
            },
            iced::Task::none(),
        )
    }

    pub fn subscription(&self) -> iced::Subscription<HomeMessage> {
        iced::time::every(TICK_INTERVAL).map(HomeMessage::Tick)
    }

    #[inline]
    pub fn details(&self) -> Option<ContentId> {
        self.details
    }

    pub fn is_hovered(&self, key: CardKey) -> bool {
        self.hover.get(&key).is_some_and(CardHover::is_hovered)
    }

    fn hovered_in_row(&self, index: usize) -> Option<ContentId> {
        self.hover
            .iter()
            .find(|(key, hover)| key.row == index && hover.is_hovered())
            .map(|(key, _)| key.id)
    }

    fn apply_preview(&mut self, intent: Option<PreviewIntent>) {
        match intent {
            Some(PreviewIntent::Play) => self.preview.play(),
            Some(PreviewIntent::Pause) => self.preview.pause(),
            None => {}
        }
    }

    fn hero_view<'a>(
        &'a self,
        item: &'a ContentItem,
        settings: &UserSettings,
    ) -> iced::Element<'a, HomeMessage> {
        let backdrop: iced::Element<'a, HomeMessage> =
            match (self.hero.is_revealed(), self.preview.backend()) {
                #[cfg(feature = "video")]
                (true, Backend::Video(media)) => container(
                    iced_video_player::VideoPlayer::new(media.video())
                        .on_new_frame(HomeMessage::NewFrame),
                )
                .center_x(iced::Length::Fill)
                .height(HERO_HEIGHT)
                .clip(true)
                .into(),
                _ => artwork(settings, &item.image_url, iced::Length::Fill, HERO_HEIGHT),
            };

        let info = column![]
            .spacing(18.0)
            .max_width(560.0)
            .push(text(&item.title).font(BOLD_FONT).size(52.0))
            .push(text(truncate_text(&item.description, 180)).size(17.0))
            .push(
                row![]
                    .spacing(12.0)
                    .push(
                        button(
                            row![]
                                .spacing(6.0)
                                .align_y(iced::Alignment::Center)
                                .push(icon(0xe037).size(26.0))
                                .push(text("Play").font(BOLD_FONT).size(18.0)),
                        )
                        .on_press(HomeMessage::Play(item.id))
                        .padding(iced::Padding::new(8.0).left(22.0).right(26.0))
                        .style(light_button),
                    )
                    .push(
                        button(
                            row![]
                                .spacing(6.0)
                                .align_y(iced::Alignment::Center)
                                .push(icon(0xe88e).size(26.0))
                                .push(text("More Info").font(BOLD_FONT).size(18.0)),
                        )
                        .on_press(HomeMessage::OpenDetails(item.id))
                        .padding(iced::Padding::new(8.0).left(22.0).right(26.0))
                        .style(|_, status| button::Style {
                            background: Some(iced::Background::Color(
                                greyscale(109).scale_alpha(match status {
                                    button::Status::Hovered | button::Status::Pressed => 0.4,
                                    _ => 0.7,
                                }),
                            )),
                            border: iced::Border::default().rounded(4.0),
                            text_color: iced::Color::WHITE,
                            ..Default::default()
                        }),
                    ),
            );

        let controls = row![]
            .align_y(iced::Alignment::End)
            .push(info)
            .push(horizontal_space())
            .push_maybe(self.hero.is_revealed().then(|| {
                button(
                    icon(if self.preview_muted { 0xe04f } else { 0xe050 })
                        .size(22.0)
                        .align_x(iced::Alignment::Center),
                )
                .on_press(HomeMessage::TogglePreviewMute)
                .width(42.0)
                .height(42.0)
                .padding(9.0)
                .style(round_button)
            }));

        stack![]
            .width(iced::Length::Fill)
            .height(HERO_HEIGHT)
            .push(backdrop)
            .push(
                container(controls)
                    .padding(iced::Padding::new(0.0).left(SIDE_PADDING).right(SIDE_PADDING).bottom(150.0))
                    .align_y(iced::Alignment::End)
                    .width(iced::Length::Fill)
                    .height(iced::Length::Fill)
                    .style(|_| container::Style {
                        background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                            iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
                                .add_stop(0.0, iced::Color::BLACK.scale_alpha(0.8))
                                .add_stop(0.6, iced::Color::BLACK.scale_alpha(0.0)),
                        ))),
                        ..Default::default()
                    }),
            )
            .into()
    }

    fn row_view<'a>(
        &'a self,
        index: usize,
        group: &'a RowGroup,
        settings: &UserSettings,
    ) -> iced::Element<'a, HomeMessage> {
        let Some(scroller) = self.rows.get(index) else {
            return iced::Element::from(horizontal_space());
        };

        let strip = scrollable(
            row(group.items.iter().map(|item| {
                let key = CardKey { row: index, id: item.id };
                cards::card(
                    key,
                    item,
                    self.hover.get(&key).copied().unwrap_or_default(),
                    settings,
                )
            }))
            .spacing(8.0)
            .padding(iced::Padding::new(0.0).left(SIDE_PADDING).right(SIDE_PADDING)),
        )
        .id(scroller.id())
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(0.0).scroller_width(0.0),
        ))
        .on_scroll(move |viewport| HomeMessage::RowScrolled(index, viewport))
        .width(iced::Length::Fill);

        let strip = mouse_area(strip)
            .on_move(move |point| HomeMessage::RowPointer(index, point))
            .on_press(HomeMessage::RowPressed(index))
            .on_release(HomeMessage::RowReleased(index))
            .on_exit(HomeMessage::RowLeft(index));

        let view = scroller.view();
        let arrows = row![]
            .height(cards::CARD_HEIGHT)
            .push_maybe(
                view.can_scroll_left
                    .then(|| row_arrow(index, ScrollDirection::Left)),
            )
            .push(horizontal_space())
            .push_maybe(
                view.can_scroll_right
                    .then(|| row_arrow(index, ScrollDirection::Right)),
            );

        column![]
            .spacing(10.0)
            .push(
                container(text(&group.title).font(BOLD_FONT).size(20.0))
                    .padding(iced::Padding::new(0.0).left(SIDE_PADDING)),
            )
            .push(stack![strip, arrows])
            .into()
    }
}

fn row_arrow<'a>(index: usize, direction: ScrollDirection) -> iced::Element<'a, HomeMessage> {
    button(
        icon(match direction {
            ScrollDirection::Left => 0xe5cb,
            ScrollDirection::Right => 0xe5cc,
        })
        .size(40.0)
        .align_x(iced::Alignment::Center)
        .align_y(iced::Alignment::Center)
        .width(iced::Length::Fill)
        .height(iced::Length::Fill),
    )
    .on_press(HomeMessage::ScrollRow(index, direction))
    .width(SIDE_PADDING)
    .height(iced::Length::Fill)
    .padding(0.0)
    .style(|_, status| button::Style {
        background: Some(iced::Background::Color(iced::Color::BLACK.scale_alpha(
            match status {
                button::Status::Hovered | button::Status::Pressed => 0.7,
                _ => 0.5,
            },
        ))),
        text_color: iced::Color::WHITE,
        ..Default::default()
    })
    .into()
}

fn footer<'a>() -> iced::Element<'a, HomeMessage> {
    let links = [
        "Audio Description",
        "Help Center",
        "Media Center",
        "Privacy",
        "Contact Us",
    ];

    column![]
        .spacing(16.0)
        .padding(iced::Padding::new(40.0).left(SIDE_PADDING).right(SIDE_PADDING))
        .push(
            row(links.map(|link| iced::Element::from(text(link).size(13.0).color(greyscale(128)))))
                .spacing(28.0),
        )
        .push(text("© Marquee").size(11.0).color(greyscale(100)))
        .into()
}

impl Screen for Home {
    type Message = HomeMessage;

    fn update(
        &mut self,
        message: HomeMessage,
        _state: &mut AppState,
        _now: Instant,
    ) -> iced::Task<HomeMessage> {
        match message {
            HomeMessage::Tick(now) => {
                self.preview.backend_mut().advance(now);
                self.preview.sync();
                let intent = self.hero.tick(now);
                self.apply_preview(intent);
            }
            HomeMessage::NewFrame => self.preview.sync(),
            HomeMessage::FeedScrolled(viewport) => {
                let scroll_y = viewport.absolute_offset().y;
                self.scrolled = navbar::is_scrolled(scroll_y);
                let ratio = hero::visible_ratio(0.0, HERO_HEIGHT, scroll_y, viewport.bounds().height);
                let intent = self.hero.set_visible_ratio(ratio);
                self.apply_preview(intent);
            }
            HomeMessage::RowScrolled(index, viewport) => {
                if let Some(scroller) = self.rows.get_mut(index) {
                    scroller.scrolled(
                        viewport.absolute_offset().x,
                        viewport.content_bounds().width,
                        viewport.bounds().width,
                    );
                }
            }
            HomeMessage::ScrollRow(index, direction) => {
                if let Some(scroller) = self.rows.get(index) {
                    return scroller.page(direction);
                }
            }
            HomeMessage::RowPointer(index, point) => {
                if let Some(scroller) = self.rows.get_mut(index) {
                    if let Some(offset) = scroller.pointer_moved(point.x) {
                        return scroller.scroll_to(offset);
                    }
                }
            }
            HomeMessage::RowPressed(index) => {
                if let Some(scroller) = self.rows.get_mut(index) {
                    scroller.press();
                }
            }
            HomeMessage::RowReleased(index) => {
                let clicked = self
                    .rows
                    .get_mut(index)
                    .is_some_and(|scroller| scroller.release());
                if clicked {
                    if let Some(id) = self.hovered_in_row(index) {
                        self.details = Some(id);
                    }
                }
            }
            HomeMessage::RowLeft(index) => {
                if let Some(scroller) = self.rows.get_mut(index) {
                    scroller.release();
                }
            }
            HomeMessage::CardEntered(key) => self.hover.entry(key).or_default().enter(),
            HomeMessage::CardLeft(key) => {
                if let Some(hover) = self.hover.get_mut(&key) {
                    hover.leave();
                }
            }
            HomeMessage::OpenDetails(id) => self.details = Some(id),
            HomeMessage::CloseDetails => self.details = None,
            HomeMessage::TogglePreviewMute => {
                self.preview_muted = !self.preview_muted;
                self.preview.set_muted(self.preview_muted);
            }
            HomeMessage::Play(_) | HomeMessage::SignOut => {}
        }
        iced::Task::none()
    }

    fn view<'a, 'b>(&'a self, state: &'a AppState) -> iced::Element<'b, HomeMessage>
    where
        'a: 'b,
    {
        let feed = column![]
            .spacing(36.0)
            .push_maybe(
                state
                    .catalog
                    .featured()
                    .map(|item| self.hero_view(item, &state.settings)),
            )
            .extend(
                state
                    .catalog
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(index, group)| self.row_view(index, group, &state.settings)),
            )
            .push(footer());

        let mut layers = stack![]
            .width(iced::Length::Fill)
            .height(iced::Length::Fill)
            .push(
                scrollable(feed)
                    .on_scroll(HomeMessage::FeedScrolled)
                    .width(iced::Length::Fill)
                    .height(iced::Length::Fill),
            )
            .push(column![navbar::navbar(self.scrolled)]);

        if let Some(item) = self.details.and_then(|id| state.catalog.get(id)) {
            layers = layers.push(opaque(
                mouse_area(
                    center(opaque(details::details_dialog(item, &state.settings)))
                        .padding(40.0)
                        .style(|_| container::Style {
                            background: Some(iced::Background::Color(
                                iced::Color::BLACK.scale_alpha(0.7),
                            )),
                            ..Default::default()
                        }),
                )
                .on_press(HomeMessage::CloseDetails),
            ));
        }

        container(layers)
            .style(|_| container::Style {
                background: Some(iced::Background::Color(crate::ui::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }
}

#[derive(Debug, Clone)]
pub enum HomeMessage {
    Tick(Instant),
    NewFrame,
    FeedScrolled(scrollable::Viewport),
    RowScrolled(usize, scrollable::Viewport),
    ScrollRow(usize, ScrollDirection),
    RowPointer(usize, iced::Point),
    RowPressed(usize),
    RowReleased(usize),
    RowLeft(usize),
    CardEntered(CardKey),
    CardLeft(CardKey),
    OpenDetails(ContentId),
    CloseDetails,
    Play(ContentId),
    TogglePreviewMute,
    SignOut,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::testing::app_state;

    fn key(row: usize, state: &AppState) -> CardKey {
        CardKey {
            row,
            id: state.catalog.rows[row].items[0].id,
        }
    }

    #[test]
    fn hover_is_tracked_per_card() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let (mut home, _) = Home::new(&state, now);

        let first = key(0, &state);
        let other = key(1, &state);

        let _ = home.update(HomeMessage::CardEntered(first), &mut state, now);
        assert!(home.is_hovered(first));
        assert!(!home.is_hovered(other));

        let _ = home.update(HomeMessage::CardLeft(first), &mut state, now);
        assert!(!home.is_hovered(first));
    }

    #[test]
    fn click_on_hovered_card_opens_details() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let (mut home, _) = Home::new(&state, now);
        let card = key(0, &state);

        let _ = home.update(HomeMessage::CardEntered(card), &mut state, now);
        let _ = home.update(HomeMessage::RowPointer(0, iced::Point::new(100.0, 20.0)), &mut state, now);
        let _ = home.update(HomeMessage::RowPressed(0), &mut state, now);
        let _ = home.update(HomeMessage::RowReleased(0), &mut state, now);
        assert_eq!(home.details(), Some(card.id));

        let _ = home.update(HomeMessage::CloseDetails, &mut state, now);
        assert_eq!(home.details(), None);
    }

    #[test]
    fn release_without_hover_opens_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let (mut home, _) = Home::new(&state, now);

        let _ = home.update(HomeMessage::RowPressed(1), &mut state, now);
        let _ = home.update(HomeMessage::RowReleased(1), &mut state, now);
        assert_eq!(home.details(), None);
    }

    #[test]
    fn preview_starts_after_reveal() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let start = Instant::now();
        let (mut home, _) = Home::new(&state, start);

        let _ = home.update(HomeMessage::Tick(start + Duration::from_secs(1)), &mut state, start);
        assert!(!home.hero.is_revealed());

        let revealed = start + hero::REVEAL_DELAY;
        let _ = home.update(HomeMessage::Tick(revealed), &mut state, revealed);
        assert!(home.hero.is_revealed());
        assert!(!crate::playback::MediaBackend::snapshot(home.preview.backend()).paused);
    }
}
