#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    #[default]
    Windowed,
    Fullscreen,
}

/// Best-effort mirror of the window's presentation mode.
///
/// `toggle` records the request; `observe` is fed whatever the platform
/// actually reports and always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fullscreen {
    mode: Presentation,
}

impl Fullscreen {
    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.mode == Presentation::Fullscreen
    }

    /// Flips the mirror and returns the mode to request.
    pub fn toggle(&mut self) -> Presentation {
        self.mode = match self.mode {
            Presentation::Windowed => Presentation::Fullscreen,
            Presentation::Fullscreen => Presentation::Windowed,
        };
        self.mode
    }

    /// Requests windowed mode if the mirror thinks we are fullscreen.
    pub fn exit(&mut self) -> Option<Presentation> {
        self.is_fullscreen().then(|| self.toggle())
    }

    /// Reconciles with a mode reported by the platform. Returns whether it changed.
    pub fn observe(&mut self, mode: Presentation) -> bool {
        let changed = self.mode != mode;
        if changed {
            log::debug!("presentation reconciled to {:?}", mode);
        }
        self.mode = mode;
        changed
    }
}

impl From<Presentation> for iced::window::Mode {
    fn from(value: Presentation) -> Self {
        match value {
            Presentation::Windowed => iced::window::Mode::Windowed,
            Presentation::Fullscreen => iced::window::Mode::Fullscreen,
        }
    }
}

impl From<iced::window::Mode> for Presentation {
    fn from(value: iced::window::Mode) -> Self {
        match value {
            iced::window::Mode::Fullscreen => Presentation::Fullscreen,
            _ => Presentation::Windowed,
        }
    }
}
