use iced::{
    advanced::{self, layout, text, widget::tree},
    event, mouse, touch,
};
use std::marker::PhantomData;

use crate::{
    playback::format_time,
    ui::{greyscale, BRAND_RED, MONO_FONT},
};

/// Progress bar that reports the clicked or dragged position as a fraction in `0..=1`.
pub fn seekbar<'a, F, Message, Renderer>(
    progress: f64,
    duration: f64,
    on_scrub: F,
) -> Seekbar<'a, Message, Renderer>
where
    F: 'a + Fn(f64) -> Message,
    Renderer: text::Renderer<Font = iced::Font> + advanced::Renderer,
{
    Seekbar::new(progress, duration, on_scrub)
}

pub struct Seekbar<'a, Message, Renderer = iced::Renderer> {
    progress: f64,
    duration: f64,
    on_scrub: Box<dyn Fn(f64) -> Message + 'a>,
    width: iced::Length,
    height: f32,
    _renderer: PhantomData<Renderer>,
}

impl<'a, Message, Renderer> Seekbar<'a, Message, Renderer> {
    pub fn new<F>(progress: f64, duration: f64, on_scrub: F) -> Self
    where
        F: 'a + Fn(f64) -> Message,
    {
        Seekbar {
            progress: if progress.is_finite() {
                progress.clamp(0.0, 1.0)
            } else {
                0.0
            },
            duration,
            on_scrub: Box::new(on_scrub),
            width: iced::Length::Fill,
            height: 16.0,
            _renderer: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct State {
    is_hovered: bool,
    cursor_position: iced::Point,
    cursor_fraction: f64,
    is_dragging: bool,
}

fn fraction_at(bounds: iced::Rectangle, x: f32) -> f64 {
    if bounds.width <= 0.0 {
        return 0.0;
    }
    (f64::from(x - bounds.x) / f64::from(bounds.width)).clamp(0.0, 1.0)
}

impl<'a, Message, Theme, Renderer> advanced::Widget<Message, Theme, Renderer>
    for Seekbar<'a, Message, Renderer>
where
    Message: Clone + 'a,
    Theme: 'a,
    Renderer: text::Renderer<Font = iced::Font> + advanced::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> iced::Size<iced::Length> {
        iced::Size {
            width: self.width,
            height: iced::Length::Shrink,
        }
    }

    fn layout(
        &self,
        _tree: &mut tree::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.width, self.height)
    }

    fn on_event(
        &mut self,
        tree: &mut tree::Tree,
        event: iced::Event,
        layout: layout::Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn advanced::Clipboard,
        shell: &mut advanced::Shell<'_, Message>,
        _viewport: &iced::Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<State>();
        let bounds = layout.bounds();

        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            | iced::Event::Touch(touch::Event::FingerPressed { .. }) => {
                if let Some(position) = cursor.position_over(bounds) {
                    shell.publish((self.on_scrub)(fraction_at(bounds, position.x)));
                    state.is_dragging = true;
                    return event::Status::Captured;
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | iced::Event::Touch(touch::Event::FingerLifted { .. })
            | iced::Event::Touch(touch::Event::FingerLost { .. }) => {
                if state.is_dragging {
                    state.is_dragging = false;
                    return event::Status::Captured;
                }
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. })
            | iced::Event::Touch(touch::Event::FingerMoved { .. }) => {
                let position = cursor.position();
                state.is_hovered = position.is_some_and(|pos| bounds.contains(pos));
                state.cursor_position = position.unwrap_or_default();
                state.cursor_fraction = position
                    .map(|pos| fraction_at(bounds, pos.x))
                    .unwrap_or_default();

                if state.is_dragging {
                    shell.publish((self.on_scrub)(state.cursor_fraction));
                    return event::Status::Captured;
                }
            }
            _ => {}
        }

        event::Status::Ignored
    }

    fn draw(
        &self,
        tree: &tree::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &advanced::renderer::Style,
        layout: layout::Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &iced::Rectangle,
    ) {
        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();
        let active = state.is_hovered || state.is_dragging;

        let rail_height = if active { 6.0 } else { 4.0 };
        let rail_y = bounds.y + (bounds.height - rail_height) / 2.0;
        let filled = bounds.width * self.progress as f32;

        renderer.fill_quad(
            advanced::renderer::Quad {
                bounds: iced::Rectangle {
                    x: bounds.x,
                    y: rail_y,
                    width: bounds.width,
                    height: rail_height,
                },
                border: iced::Border::default().rounded(2.0),
                ..advanced::renderer::Quad::default()
            },
            iced::Background::Color(greyscale(120).scale_alpha(0.6)),
        );

        renderer.fill_quad(
            advanced::renderer::Quad {
                bounds: iced::Rectangle {
                    x: bounds.x,
                    y: rail_y,
                    width: filled,
                    height: rail_height,
                },
                border: iced::Border::default().rounded(2.0),
                ..advanced::renderer::Quad::default()
            },
            iced::Background::Color(BRAND_RED),
        );

        if active {
            let handle = 14.0;
            renderer.fill_quad(
                advanced::renderer::Quad {
                    bounds: iced::Rectangle {
                        x: bounds.x + filled - handle / 2.0,
                        y: bounds.y + (bounds.height - handle) / 2.0,
                        width: handle,
                        height: handle,
                    },
                    border: iced::Border::default().rounded(handle / 2.0),
                    ..advanced::renderer::Quad::default()
                },
                iced::Background::Color(BRAND_RED),
            );
        }
    }

    fn mouse_interaction(
        &self,
        _tree: &tree::Tree,
        layout: layout::Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &iced::Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut tree::Tree,
        layout: layout::Layout<'_>,
        _renderer: &Renderer,
        translation: iced::Vector,
    ) -> Option<advanced::overlay::Element<'b, Message, Theme, Renderer>> {
        let state = tree.state.downcast_ref::<State>();

        (self.duration > 0.0 && (state.is_hovered || state.is_dragging)).then(|| {
            advanced::overlay::Element::new(Box::new(TimeTooltip {
                origin: layout.position() + translation,
                bar: layout.bounds(),
                cursor_x: state.cursor_position.x,
                label: format_time(state.cursor_fraction * self.duration),
            }))
        })
    }
}

impl<'a, Message, Theme, Renderer> From<Seekbar<'a, Message, Renderer>>
    for iced::Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Theme: 'a,
    Renderer: text::Renderer<Font = iced::Font> + advanced::Renderer + 'a,
{
    fn from(value: Seekbar<'a, Message, Renderer>) -> Self {
        iced::Element::new(value)
    }
}

/// Hover label showing the time under the cursor, drawn above the bar.
struct TimeTooltip {
    origin: iced::Point,
    bar: iced::Rectangle,
    cursor_x: f32,
    label: String,
}

impl TimeTooltip {
    const SIZE: iced::Size = iced::Size::new(64.0, 22.0);
    const GAP: f32 = 8.0;
}

impl<Message, Theme, Renderer> advanced::Overlay<Message, Theme, Renderer> for TimeTooltip
where
    Renderer: text::Renderer<Font = iced::Font>,
{
    fn layout(&mut self, _renderer: &Renderer, viewport: iced::Size) -> layout::Node {
        let shift = self.origin - self.bar.position();
        let x = (self.cursor_x + shift.x - Self::SIZE.width / 2.0)
            .clamp(0.0, (viewport.width - Self::SIZE.width).max(0.0));
        let y = self.origin.y - Self::SIZE.height - Self::GAP;

        layout::Node::new(Self::SIZE).move_to(iced::Point::new(x, y))
    }

    fn draw(
        &self,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &advanced::renderer::Style,
        layout: layout::Layout<'_>,
        _cursor: advanced::mouse::Cursor,
    ) {
        let bounds = layout.bounds();

        renderer.fill_quad(
            advanced::renderer::Quad {
                bounds,
                border: iced::Border::default().rounded(4.0).width(1.0).color(BRAND_RED),
                shadow: Default::default(),
            },
            iced::Background::Color(iced::Color::BLACK.scale_alpha(0.85)),
        );

        renderer.fill_text(
            text::Text {
                content: self.label.clone(),
                bounds: bounds.size(),
                size: 12.into(),
                line_height: Default::default(),
                font: MONO_FONT,
                horizontal_alignment: iced::Alignment::Center.into(),
                vertical_alignment: iced::Alignment::Center.into(),
                shaping: text::Shaping::Basic,
                wrapping: text::Wrapping::None,
            },
            bounds.center(),
            greyscale(230),
            bounds,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_clamped_to_bar() {
        let bounds = iced::Rectangle::new(iced::Point::new(100.0, 0.0), iced::Size::new(200.0, 16.0));

        assert_eq!(fraction_at(bounds, 100.0), 0.0);
        assert_eq!(fraction_at(bounds, 200.0), 0.5);
        assert_eq!(fraction_at(bounds, 350.0), 1.0);
        assert_eq!(fraction_at(bounds, 50.0), 0.0);
    }

    #[test]
    fn zero_width_bar_reports_start() {
        let bounds = iced::Rectangle::new(iced::Point::ORIGIN, iced::Size::new(0.0, 16.0));
        assert_eq!(fraction_at(bounds, 10.0), 0.0);
    }
}
