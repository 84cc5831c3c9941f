mod home;
mod intro;
mod login;
mod not_found;
mod player;

pub use home::*;
pub use intro::*;
pub use login::*;
pub use not_found::*;
pub use player::*;

use super::AppState;
use std::time::Instant;

pub trait Screen {
    type Message;

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
        now: Instant,
    ) -> iced::Task<Self::Message>;
    fn view<'a, 'b>(&'a self, state: &'a AppState) -> iced::Element<'b, Self::Message>
    where
        'a: 'b;
}

/// Application-wide keyboard shortcuts, forwarded to whichever screen wants them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Escape,
    TogglePlay,
    SkipBack,
    SkipForward,
    ToggleMute,
    ToggleFullscreen,
}

impl Shortcut {
    pub fn from_key(key: iced::keyboard::Key, _modifiers: iced::keyboard::Modifiers) -> Option<Self> {
        use iced::keyboard::{key::Named, Key};

        match key.as_ref() {
            Key::Named(Named::Escape) => Some(Shortcut::Escape),
            Key::Named(Named::Space) => Some(Shortcut::TogglePlay),
            Key::Named(Named::ArrowLeft) => Some(Shortcut::SkipBack),
            Key::Named(Named::ArrowRight) => Some(Shortcut::SkipForward),
            Key::Character(c) if c.eq_ignore_ascii_case("m") => Some(Shortcut::ToggleMute),
            Key::Character(c) if c.eq_ignore_ascii_case("f") => Some(Shortcut::ToggleFullscreen),
            _ => None,
        }
    }
}
