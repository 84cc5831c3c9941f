use super::Screen;
use crate::{
    playback::{Backend, Listener, MediaAdapter, MediaEvent},
    settings::UserSettings,
    ui::{themed_button, AppState, BOLD_FONT, BRAND_RED},
};
use iced::widget::{button, column, container, horizontal_space, row, stack, text};
use std::time::{Duration, Instant};

pub const FADE_DURATION: Duration = Duration::from_millis(500);
const TICK_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    Playing,
    Fading { since: Instant },
    Done,
}

/// Intro clip lifecycle: play, fade out for [`FADE_DURATION`], done.
///
/// The end of the clip, a refused autoplay and an explicit skip all start the fade.
#[derive(Debug, Clone, Copy)]
pub struct IntroSequence {
    phase: IntroPhase,
}

impl Default for IntroSequence {
    fn default() -> Self {
        IntroSequence {
            phase: IntroPhase::Playing,
        }
    }
}

impl IntroSequence {
    #[inline]
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn media_ended(&mut self, now: Instant) {
        self.begin_fade(now);
    }

    pub fn play_refused(&mut self, now: Instant) {
        log::info!("intro playback refused, skipping ahead");
        self.begin_fade(now);
    }

    pub fn skip(&mut self, now: Instant) {
        self.begin_fade(now);
    }

    fn begin_fade(&mut self, now: Instant) {
        if self.phase == IntroPhase::Playing {
            self.phase = IntroPhase::Fading { since: now };
        }
    }

    /// Returns `true` exactly once, when the fade completes.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            IntroPhase::Fading { since } if now.saturating_duration_since(since) >= FADE_DURATION => {
                self.phase = IntroPhase::Done;
                true
            }
            _ => false,
        }
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            IntroPhase::Playing => 1.0,
            IntroPhase::Fading { since } => {
                let elapsed = now.saturating_duration_since(since).as_secs_f32();
                (1.0 - elapsed / FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0)
            }
            IntroPhase::Done => 0.0,
        }
    }
}

pub struct Intro {
    media: MediaAdapter<Backend>,
    events: Listener<MediaEvent>,
    sequence: IntroSequence,
    opacity: f32,
}

impl Intro {
    pub fn new(settings: &UserSettings, now: Instant) -> (Self, iced::Task<IntroMessage>) {
        let backend = Backend::open(settings.intro_path.as_deref(), settings.intro_seconds);
        Self::with_backend(backend, now)
    }

    pub fn with_backend(backend: Backend, now: Instant) -> (Self, iced::Task<IntroMessage>) {
        let mut media = MediaAdapter::new(backend);
        let mut events = media.subscribe();

        media.play();
        media.sync();

        let mut sequence = IntroSequence::default();
        if !events.drain().contains(&MediaEvent::Started) {
            sequence.play_refused(now);
        }

        (
            Intro {
                media,
                events,
                sequence,
                opacity: 1.0,
            },
            iced::Task::none(),
        )
    }

    #[inline]
    pub fn sequence(&self) -> &IntroSequence {
        &self.sequence
    }

    pub fn subscription(&self) -> iced::Subscription<IntroMessage> {
        iced::time::every(TICK_INTERVAL).map(IntroMessage::Tick)
    }

    fn advance(&mut self, now: Instant) -> iced::Task<IntroMessage> {
        self.media.sync();
        if self.events.drain().contains(&MediaEvent::Stopped) {
            self.sequence.media_ended(now);
        }

        let finished = self.sequence.tick(now);
        self.opacity = self.sequence.opacity(now);

        if finished {
            self.media.pause();
            iced::Task::done(IntroMessage::Finished)
        } else {
            iced::Task::none()
        }
    }
}

#[derive(Debug, Clone)]
pub enum IntroMessage {
    Tick(Instant),
    NewFrame,
    Skip,
    Finished,
}

impl Screen for Intro {
    type Message = IntroMessage;

    fn update(
        &mut self,
        message: IntroMessage,
        _state: &mut AppState,
        now: Instant,
    ) -> iced::Task<IntroMessage> {
        match message {
            IntroMessage::Tick(now) => {
                self.media.backend_mut().advance(now);
                self.advance(now)
            }
            IntroMessage::NewFrame => self.advance(now),
            IntroMessage::Skip => {
                self.sequence.skip(now);
                self.advance(now)
            }
            IntroMessage::Finished => iced::Task::none(),
        }
    }

    fn view<'a, 'b>(&'a self, _state: &'a AppState) -> iced::Element<'b, IntroMessage>
    where
        'a: 'b,
    {
        let surface: iced::Element<IntroMessage> = match self.media.backend() {
            #[cfg(feature = "video")]
            Backend::Video(media) => container(
                iced_video_player::VideoPlayer::new(media.video())
                    .on_new_frame(IntroMessage::NewFrame),
            )
            .center(iced::Length::Fill)
            .into(),
            Backend::Simulated(_) => container(
                text("MARQUEE")
                    .font(BOLD_FONT)
                    .size(96.0)
                    .color(BRAND_RED.scale_alpha(self.opacity)),
            )
            .center(iced::Length::Fill)
            .into(),
        };

        let opacity = self.opacity;

        container(
            stack![]
                .push(surface)
                .push(
                    column![]
                        .push(iced::widget::vertical_space())
                        .push(
                            row![].push(horizontal_space()).push(
                                button(text("Skip intro").font(BOLD_FONT))
                                    .on_press(IntroMessage::Skip)
                                    .padding(iced::Padding::new(8.0).left(16.0).right(16.0))
                                    .style(themed_button),
                            ),
                        )
                        .padding(30.0),
                )
                .push(
                    container("")
                        .width(iced::Length::Fill)
                        .height(iced::Length::Fill)
                        .style(move |_| container::Style {
                            background: Some(iced::Background::Color(
                                iced::Color::BLACK.scale_alpha(1.0 - opacity),
                            )),
                            ..Default::default()
                        }),
                ),
        )
        .style(|_| container::Style {
            background: Some(iced::Background::Color(iced::Color::BLACK)),
            ..Default::default()
        })
        .width(iced::Length::Fill)
        .height(iced::Length::Fill)
        .into()
    }
}
