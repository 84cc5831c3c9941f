mod seekbar;

use super::{Screen, Shortcut};
use crate::{
    catalog::{Catalog, ContentId, ContentItem},
    playback::{
        AutoHide, Backend, Fullscreen, MediaAdapter, MediaEvent, PlayIcon, PlaybackControls,
        PlaybackSession, Presentation, VolumeIcon,
    },
    settings::UserSettings,
    ui::{greyscale, icon, AppState, BOLD_FONT, MONO_FONT},
};
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, row, slider, stack, text,
    vertical_space,
};
use seekbar::seekbar;
use std::time::{Duration, Instant};

/// Clock length used when a title's running time cannot be parsed (series, etc).
const FALLBACK_RUNNING_TIME: f64 = 45.0 * 60.0;
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Outcome of opening a watch route.
pub enum Watch {
    Player(Player),
    NotFound(ContentId),
}

impl Watch {
    pub fn resolve(id: ContentId, state: &AppState, now: Instant) -> Self {
        let media_path = state.settings.media_path.as_deref();
        Self::resolve_with(id, &state.catalog, &state.settings, now, |item| {
            Backend::open(
                media_path,
                item.running_time().unwrap_or(FALLBACK_RUNNING_TIME),
            )
        })
    }

    /// Looks `id` up before touching any media. `open` only runs for known titles.
    pub fn resolve_with(
        id: ContentId,
        catalog: &Catalog,
        settings: &UserSettings,
        now: Instant,
        open: impl FnOnce(&ContentItem) -> Backend,
    ) -> Self {
        match catalog.get(id) {
            Some(item) => Watch::Player(Player::new(item, open(item), settings, now)),
            None => {
                log::warn!("no catalog entry for title {}", id);
                Watch::NotFound(id)
            }
        }
    }
}

pub struct Player {
    id: ContentId,
    title: String,
    controls: PlaybackControls<Backend>,
    auto_hide: AutoHide,
    fullscreen: Fullscreen,
    skip_seconds: f64,
}

impl Player {
    pub fn new(item: &ContentItem, backend: Backend, settings: &UserSettings, now: Instant) -> Self {
        let controls = PlaybackControls::new(MediaAdapter::new(backend), settings.volume);

        let mut player = Player {
            id: item.id,
            title: item.title.clone(),
            controls,
            auto_hide: AutoHide::new(settings.hide_delay(), now),
            fullscreen: Fullscreen::default(),
            skip_seconds: settings.skip_seconds,
        };

        player.sync(now);
        if settings.autoplay {
            player.controls.play();
            player.sync(now);
        }
        player
    }

    #[inline]
    pub fn id(&self) -> ContentId {
        self.id
    }

    #[inline]
    pub fn session(&self) -> &PlaybackSession {
        self.controls.session()
    }

    pub fn subscription(&self) -> iced::Subscription<PlayerMessage> {
        iced::time::every(TICK_INTERVAL).map(PlayerMessage::Tick)
    }

    pub fn shortcut(&self, shortcut: Shortcut) -> Option<PlayerMessage> {
        match shortcut {
            Shortcut::Escape => self
                .fullscreen
                .is_fullscreen()
                .then_some(PlayerMessage::ToggleFullscreen),
            Shortcut::TogglePlay => Some(PlayerMessage::TogglePause),
            Shortcut::SkipBack => Some(PlayerMessage::Skip(-self.skip_seconds)),
            Shortcut::SkipForward => Some(PlayerMessage::Skip(self.skip_seconds)),
            Shortcut::ToggleMute => Some(PlayerMessage::ToggleMute),
            Shortcut::ToggleFullscreen => Some(PlayerMessage::ToggleFullscreen),
        }
    }

    /// Folds pending media notifications into the session.
    fn sync(&mut self, now: Instant) {
        for event in self.controls.refresh() {
            if matches!(event, MediaEvent::Started | MediaEvent::Stopped) {
                self.auto_hide
                    .playback_changed(self.controls.session().is_playing, now);
            }
        }
        self.mirror();
    }

    fn mirror(&mut self) {
        let is_visible = self.auto_hide.is_visible();
        let is_fullscreen = self.fullscreen.is_fullscreen();
        let session = self.controls.session_mut();
        session.controls_visible = is_visible;
        session.is_fullscreen = is_fullscreen;
    }

    fn surface(&self) -> iced::Element<PlayerMessage> {
        match self.controls.adapter().backend() {
            #[cfg(feature = "video")]
            Backend::Video(media) => center(
                iced_video_player::VideoPlayer::new(media.video())
                    .on_new_frame(PlayerMessage::NewFrame),
            )
            .into(),
            Backend::Simulated(_) => center(
                column![]
                    .spacing(6.0)
                    .align_x(iced::Alignment::Center)
                    .push(text(&self.title).font(BOLD_FONT).size(32.0).color(greyscale(80)))
                    .push(text("Simulated playback").size(14.0).color(greyscale(70))),
            )
            .into(),
        }
    }

    fn top_bar(&self) -> iced::Element<PlayerMessage> {
        container(
            row![]
                .spacing(20.0)
                .align_y(iced::Alignment::Center)
                .push(control_button(icon(0xe5c4), PlayerMessage::Back, false))
                .push(horizontal_space())
                .push(control_button(
                    icon(if self.fullscreen.is_fullscreen() {
                        0xe5d1
                    } else {
                        0xe5d0
                    }),
                    PlayerMessage::ToggleFullscreen,
                    false,
                )),
        )
        .style(|_| container::Style {
            background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                iced::gradient::Linear::new(0.0)
                    .add_stop(0.0, iced::Color::from_rgba8(0, 0, 0, 0.0))
                    .add_stop(1.0, iced::Color::from_rgba8(0, 0, 0, 0.8)),
            ))),
            ..Default::default()
        })
        .padding(iced::Padding::ZERO.left(20.0).right(20.0))
        .align_y(iced::Alignment::Center)
        .width(iced::Length::Fill)
        .height(70.0)
        .into()
    }

    fn bottom_bar(&self) -> iced::Element<PlayerMessage> {
        let session = self.controls.session();

        container(
            column![]
                .spacing(12.0)
                .push(seekbar(
                    self.controls.progress_percent() / 100.0,
                    session.duration,
                    PlayerMessage::Scrub,
                ))
                .push(
                    row![]
                        .spacing(10.0)
                        .align_y(iced::Alignment::Center)
                        .push(control_button(
                            icon(match self.controls.play_icon() {
                                PlayIcon::Play => 0xe037,
                                PlayIcon::Pause => 0xe034,
                            }),
                            PlayerMessage::TogglePause,
                            false,
                        ))
                        .push(control_button(
                            icon(0xe059),
                            PlayerMessage::Skip(-self.skip_seconds),
                            true,
                        ))
                        .push(control_button(
                            icon(0xe056),
                            PlayerMessage::Skip(self.skip_seconds),
                            true,
                        ))
                        .push(control_button(
                            icon(match self.controls.volume_icon() {
                                VolumeIcon::Muted => 0xe04f,
                                VolumeIcon::Audible => 0xe050,
                            }),
                            PlayerMessage::ToggleMute,
                            true,
                        ))
                        .push(
                            slider(0.0..=1.0, session.volume, PlayerMessage::Volume)
                                .step(0.01)
                                .width(100.0),
                        )
                        .push(
                            text(&self.title)
                                .font(BOLD_FONT)
                                .size(16.0)
                                .width(iced::Length::Fill)
                                .align_x(iced::Alignment::Center),
                        )
                        .push(
                            text(self.controls.time_label())
                                .font(MONO_FONT)
                                .size(13.0)
                                .color(greyscale(210)),
                        ),
                ),
        )
        .padding(iced::Padding::ZERO.left(20.0).right(20.0).bottom(10.0))
        .style(|_| container::Style {
            background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                iced::gradient::Linear::new(0.0)
                    .add_stop(0.0, iced::Color::from_rgba8(0, 0, 0, 0.9))
                    .add_stop(0.5, iced::Color::from_rgba8(0, 0, 0, 0.7))
                    .add_stop(1.0, iced::Color::from_rgba8(0, 0, 0, 0.0)),
            ))),
            ..Default::default()
        })
        .align_y(iced::Alignment::End)
        .width(iced::Length::Fill)
        .height(130.0)
        .into()
    }
}

impl Screen for Player {
    type Message = PlayerMessage;

    fn update(
        &mut self,
        message: PlayerMessage,
        state: &mut AppState,
        now: Instant,
    ) -> iced::Task<PlayerMessage> {
        match message {
            PlayerMessage::Tick(now) => {
                self.controls.adapter_mut().backend_mut().advance(now);
                self.sync(now);
                if self.auto_hide.tick(now) {
                    self.mirror();
                }
            }
            PlayerMessage::NewFrame => self.sync(now),
            PlayerMessage::TogglePause => {
                self.controls.toggle_play_pause();
                self.sync(now);
            }
            PlayerMessage::Skip(delta) => {
                self.controls.skip(delta);
                self.sync(now);
            }
            PlayerMessage::Scrub(fraction) => {
                self.controls.scrub_to(fraction);
                self.sync(now);
            }
            PlayerMessage::Volume(volume) => {
                self.controls.set_volume(volume);
                state.settings.volume = self.controls.session().volume;
            }
            PlayerMessage::ToggleMute => self.controls.toggle_mute(),
            PlayerMessage::ToggleFullscreen => {
                let mode = iced::window::Mode::from(self.fullscreen.toggle());
                self.mirror();
                return iced::window::get_latest()
                    .and_then(move |id| iced::window::change_mode::<()>(id, mode))
                    .discard();
            }
            PlayerMessage::PresentationObserved(mode) => {
                self.fullscreen.observe(mode);
                self.mirror();
            }
            PlayerMessage::PointerMoved => {
                self.auto_hide.pointer_moved(now);
                self.mirror();
            }
            PlayerMessage::PointerLeft => {
                self.auto_hide.pointer_left();
                self.mirror();
            }
            PlayerMessage::Back => {}
        }
        iced::Task::none()
    }

    fn view<'a, 'b>(&'a self, _state: &'a AppState) -> iced::Element<'b, PlayerMessage>
    where
        'a: 'b,
    {
        let session = self.controls.session();

        let mut layers = stack![]
            .width(iced::Length::Fill)
            .height(iced::Length::Fill)
            .push(
                container(self.surface())
                    .width(iced::Length::Fill)
                    .height(iced::Length::Fill)
                    .style(|_| container::Style {
                        background: Some(iced::Background::Color(iced::Color::BLACK)),
                        ..Default::default()
                    }),
            );

        if !session.is_playing {
            layers = layers.push(center(
                button(
                    icon(0xe037)
                        .size(56.0)
                        .align_x(iced::Alignment::Center)
                        .align_y(iced::Alignment::Center)
                        .width(iced::Length::Fill)
                        .height(iced::Length::Fill),
                )
                .on_press(PlayerMessage::TogglePause)
                .width(96.0)
                .height(96.0)
                .padding(0.0)
                .style(|_, status| button::Style {
                    background: Some(iced::Background::Color(iced::Color::BLACK.scale_alpha(
                        match status {
                            button::Status::Hovered | button::Status::Pressed => 0.7,
                            _ => 0.5,
                        },
                    ))),
                    border: iced::Border::default().rounded(48.0),
                    text_color: iced::Color::WHITE,
                    ..Default::default()
                }),
            ));
        }

        if session.controls_visible {
            layers = layers.push(
                column![]
                    .width(iced::Length::Fill)
                    .height(iced::Length::Fill)
                    .push(self.top_bar())
                    .push(vertical_space().height(iced::Length::Fill))
                    .push(self.bottom_bar()),
            );
        }

        mouse_area(layers)
            .on_move(|_| PlayerMessage::PointerMoved)
            .on_exit(PlayerMessage::PointerLeft)
            .on_press(PlayerMessage::TogglePause)
            .into()
    }
}

#[derive(Debug, Clone)]
pub enum PlayerMessage {
    Tick(Instant),
    NewFrame,
    TogglePause,
    Skip(f64),
    Scrub(f64),
    Volume(f64),
    ToggleMute,
    ToggleFullscreen,
    PresentationObserved(Presentation),
    PointerMoved,
    PointerLeft,
    Back,
}

fn control_button<'a>(
    icon: iced::widget::Text<'a>,
    on_press: PlayerMessage,
    small: bool,
) -> iced::Element<'a, PlayerMessage> {
    button(
        icon.size(if small { 26.0 } else { 30.0 })
            .width(iced::Length::Fill)
            .height(iced::Length::Fill)
            .align_x(iced::Alignment::Center)
            .align_y(iced::Alignment::Center)
            .color(greyscale(220)),
    )
    .style(|_, status| button::Style {
        background: match status {
            button::Status::Hovered => Some(iced::Background::Color(
                iced::Color::WHITE.scale_alpha(0.1),
            )),
            _ => None,
        },
        border: iced::Border::default().rounded(5.0),
        ..Default::default()
    })
    .on_press(on_press)
    .padding(0.0)
    .width(40.0)
    .height(40.0)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{playback::SimulatedMedia, ui::screen::testing::app_state};
    use std::cell::Cell;

    fn player_at(now: Instant, state: &AppState) -> Player {
        let id = state.catalog.rows[0].items[0].id;
        match Watch::resolve_with(id, &state.catalog, &state.settings, now, |_| {
            Backend::Simulated(SimulatedMedia::new(600.0))
        }) {
            Watch::Player(player) => player,
            Watch::NotFound(_) => panic!("first catalog item should resolve"),
        }
    }

    #[test]
    fn unknown_title_never_opens_media() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let opened = Cell::new(0);

        let watch = Watch::resolve_with(
            ContentId(999_999),
            &state.catalog,
            &state.settings,
            Instant::now(),
            |_| {
                opened.set(opened.get() + 1);
                Backend::Simulated(SimulatedMedia::new(1.0))
            },
        );

        assert!(matches!(watch, Watch::NotFound(ContentId(999_999))));
        assert_eq!(opened.get(), 0);
    }

    #[test]
    fn opening_autoplays() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(dir.path());
        let player = player_at(Instant::now(), &state);

        assert!(player.session().is_playing);
        assert_eq!(player.session().duration, 600.0);
        assert!(player.session().controls_visible);
    }

    #[test]
    fn autoplay_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        state.settings.autoplay = false;

        let player = player_at(Instant::now(), &state);
        assert!(!player.session().is_playing);
    }

    #[test]
    fn controls_hide_while_playing_and_return_on_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let start = Instant::now();
        let mut player = player_at(start, &state);

        let _ = player.update(
            PlayerMessage::Tick(start + Duration::from_millis(2999)),
            &mut state,
            start,
        );
        assert!(player.session().controls_visible);

        let _ = player.update(
            PlayerMessage::Tick(start + Duration::from_millis(3000)),
            &mut state,
            start,
        );
        assert!(!player.session().controls_visible);

        let later = start + Duration::from_secs(4);
        let _ = player.update(PlayerMessage::PointerMoved, &mut state, later);
        assert!(player.session().controls_visible);
    }

    #[test]
    fn paused_player_keeps_controls() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let start = Instant::now();
        let mut player = player_at(start, &state);

        let _ = player.update(PlayerMessage::TogglePause, &mut state, start);
        assert!(!player.session().is_playing);

        let _ = player.update(
            PlayerMessage::Tick(start + Duration::from_secs(10)),
            &mut state,
            start,
        );
        let _ = player.update(PlayerMessage::PointerLeft, &mut state, start);
        assert!(player.session().controls_visible);
    }

    #[test]
    fn skip_and_scrub_stay_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let mut player = player_at(now, &state);

        let _ = player.update(PlayerMessage::Skip(-10.0), &mut state, now);
        assert_eq!(player.session().current_time, 0.0);

        let _ = player.update(PlayerMessage::Scrub(0.5), &mut state, now);
        assert_eq!(player.session().current_time, 300.0);

        let _ = player.update(PlayerMessage::Skip(10.0), &mut state, now);
        assert_eq!(player.session().current_time, 310.0);
    }

    #[test]
    fn volume_is_remembered_in_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let mut player = player_at(now, &state);

        let _ = player.update(PlayerMessage::Volume(0.0), &mut state, now);
        assert!(player.session().is_muted);
        assert_eq!(state.settings.volume, 0.0);
    }

    #[test]
    fn observed_presentation_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = app_state(dir.path());
        let now = Instant::now();
        let mut player = player_at(now, &state);

        let _ = player.update(
            PlayerMessage::PresentationObserved(Presentation::Fullscreen),
            &mut state,
            now,
        );
        assert!(player.session().is_fullscreen);
        assert_eq!(
            player.shortcut(Shortcut::Escape).map(|m| matches!(m, PlayerMessage::ToggleFullscreen)),
            Some(true)
        );
    }
}
