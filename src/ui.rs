pub mod app;
pub mod screen;

use crate::{catalog, session::SessionStore, settings::UserSettings};
use iced::widget::{button, checkbox, container, image, text, text_input};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Home,
    Watch(catalog::ContentId),
}

/// Back stack of visited routes. Never empty.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Router { stack: vec![start] }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.stack.push(route);
        }
    }

    /// Forgets history, e.g. after signing out.
    pub fn reset(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }

    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop();
            Some(self.current())
        } else {
            None
        }
    }
}

pub struct AppState {
    pub storage_path: PathBuf,
    pub catalog: catalog::Catalog,
    pub settings: UserSettings,
    pub session: Box<dyn SessionStore>,
}

impl AppState {
    pub fn save_settings(&self) -> anyhow::Result<()> {
        self.settings.save(&self.storage_path)
    }
}

pub const BRAND_RED: iced::Color = iced::Color::from_rgb(0.898, 0.035, 0.078);
pub const BACKGROUND: iced::Color = iced::Color::from_rgb(0.078, 0.078, 0.078);

#[cfg(target_os = "windows")]
pub const SANS_FONT: iced::Font = iced::Font {
    family: iced::font::Family::Name("Segoe UI"),
    weight: iced::font::Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    style: iced::font::Style::Normal,
};

#[cfg(target_os = "macos")]
pub const SANS_FONT: iced::Font = iced::Font {
    family: iced::font::Family::Name("SF Pro"),
    weight: iced::font::Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    style: iced::font::Style::Normal,
};

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const SANS_FONT: iced::Font = iced::Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    style: iced::font::Style::Normal,
};

pub const BOLD_FONT: iced::Font = iced::Font {
    weight: iced::font::Weight::Bold,
    ..SANS_FONT
};

pub const MONO_FONT: iced::Font = iced::Font::MONOSPACE;

pub const ICON_FONT: iced::Font = iced::Font {
    family: iced::font::Family::Name("Material Symbols Sharp"),
    weight: iced::font::Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    style: iced::font::Style::Normal,
};

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    } else {
        text.into()
    }
}

pub fn greyscale(rgb: u8) -> iced::Color {
    iced::Color::from_rgb8(rgb, rgb, rgb)
}

pub fn icon<'a>(codepoint: u32) -> iced::widget::Text<'a> {
    text(char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER)).font(ICON_FONT)
}

/// Artwork for a catalog image path, or a flat placeholder when the file is absent.
pub fn artwork<'a, Message: 'a>(
    settings: &UserSettings,
    url: &str,
    width: impl Into<iced::Length>,
    height: impl Into<iced::Length>,
) -> iced::Element<'a, Message> {
    let width = width.into();
    let height = height.into();
    match settings.asset(url) {
        Some(path) => image(image::Handle::from_path(path))
            .content_fit(iced::ContentFit::Cover)
            .width(width)
            .height(height)
            .into(),
        None => container("")
            .width(width)
            .height(height)
            .style(|_| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(0.8)
                        .add_stop(0.0, greyscale(60))
                        .add_stop(1.0, greyscale(25)),
                ))),
                ..Default::default()
            })
            .into(),
    }
}

pub fn themed_button(theme: &iced::Theme, status: button::Status) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(match status {
            button::Status::Active | button::Status::Disabled => iced::Color::TRANSPARENT,
            _ => iced::Color::from_rgba8(255, 255, 255, 0.1),
        })),
        border: iced::Border::default().rounded(5.0),
        text_color: match status {
            button::Status::Disabled => theme.extended_palette().background.strong.color,
            _ => theme.palette().text,
        },
        ..Default::default()
    }
}

pub fn primary_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(match status {
            button::Status::Hovered | button::Status::Pressed => {
                iced::Color::from_rgb8(244, 6, 18)
            }
            _ => BRAND_RED,
        })),
        border: iced::Border::default().rounded(4.0),
        text_color: iced::Color::WHITE,
        ..Default::default()
    }
}

pub fn light_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(match status {
            button::Status::Hovered | button::Status::Pressed => {
                iced::Color::WHITE.scale_alpha(0.8)
            }
            _ => iced::Color::WHITE,
        })),
        border: iced::Border::default().rounded(4.0),
        text_color: iced::Color::BLACK,
        ..Default::default()
    }
}

/// Round outlined button used for the card and dialog affordances.
pub fn round_button(_theme: &iced::Theme, status: button::Status) -> button::Style {
    button::Style {
        background: Some(iced::Background::Color(iced::Color::BLACK.scale_alpha(0.5))),
        border: iced::Border::default()
            .rounded(100.0)
            .width(1.5)
            .color(match status {
                button::Status::Hovered | button::Status::Pressed => iced::Color::WHITE,
                _ => greyscale(140),
            }),
        text_color: iced::Color::WHITE,
        ..Default::default()
    }
}

pub fn themed_text_input(theme: &iced::Theme, status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: iced::Background::Color(match status {
            text_input::Status::Focused => greyscale(70),
            _ => greyscale(51),
        }),
        border: iced::Border::default()
            .rounded(4.0)
            .color(greyscale(130))
            .width(match status {
                text_input::Status::Focused => 1.0,
                _ => 0.0,
            }),
        icon: theme.palette().text,
        placeholder: greyscale(140),
        value: theme.palette().text,
        selection: BRAND_RED.scale_alpha(0.6),
    }
}

pub fn themed_checkbox(_theme: &iced::Theme, status: checkbox::Status) -> checkbox::Style {
    let is_checked = match status {
        checkbox::Status::Active { is_checked }
        | checkbox::Status::Hovered { is_checked }
        | checkbox::Status::Disabled { is_checked } => is_checked,
    };

    checkbox::Style {
        background: iced::Background::Color(if is_checked {
            BRAND_RED
        } else {
            greyscale(0).scale_alpha(0.9)
        }),
        icon_color: if is_checked {
            iced::Color::WHITE
        } else {
            iced::Color::TRANSPARENT
        },
        border: iced::Border {
            color: greyscale(100),
            width: 1.0,
            radius: iced::border::radius(3.0),
        },
        text_color: Some(greyscale(170)),
    }
}

pub fn badge<'a, Message: 'a>(label: impl text::IntoFragment<'a>) -> iced::Element<'a, Message> {
    container(text(label).size(11.0))
        .padding(iced::Padding::new(1.0).left(5.0).right(5.0))
        .style(|_| container::Style {
            border: iced::Border::default().width(1.0).color(greyscale(130)),
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentId;

    #[test]
    fn router_back_walks_history() {
        let mut router = Router::new(Route::Login);
        router.push(Route::Home);
        router.push(Route::Watch(ContentId(3)));

        assert_eq!(router.back(), Some(Route::Home));
        assert_eq!(router.back(), Some(Route::Login));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn router_ignores_duplicate_push() {
        let mut router = Router::new(Route::Home);
        router.push(Route::Home);
        assert_eq!(router.back(), None);
    }

    #[test]
    fn router_reset_drops_history() {
        let mut router = Router::new(Route::Login);
        router.push(Route::Home);
        router.reset(Route::Login);
        assert_eq!(router.back(), None);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a somewhat longer line", 10), "a somew...");
        assert_eq!(truncate_text("a b c d e f", 8), "a b c...");
    }
}
