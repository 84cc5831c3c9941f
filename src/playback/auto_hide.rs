use std::time::{Duration, Instant};

pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Visibility policy for the transport controls overlay.
///
/// The timer is single-shot and rearmed on every qualifying event, so constant
/// pointer activity keeps the overlay up. Expiry only hides while playing.
#[derive(Debug, Clone)]
pub struct AutoHide {
    delay: Duration,
    visibility: Visibility,
    deadline: Option<Instant>,
    playing: bool,
}

impl AutoHide {
    pub fn new(delay: Duration, now: Instant) -> Self {
        AutoHide {
            delay,
            visibility: Visibility::Visible,
            deadline: Some(now + delay),
            playing: false,
        }
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.reset(now);
    }

    pub fn pointer_left(&mut self) {
        if self.playing {
            self.visibility = Visibility::Hidden;
            self.deadline = None;
        }
    }

    pub fn playback_changed(&mut self, playing: bool, now: Instant) {
        self.playing = playing;
        self.reset(now);
    }

    /// Fires the timer if it is due. Returns whether visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.playing && self.visibility == Visibility::Visible {
                    self.visibility = Visibility::Hidden;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.visibility = Visibility::Visible;
        self.deadline = Some(now + self.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn playing(start: Instant) -> AutoHide {
        let mut auto_hide = AutoHide::new(DEFAULT_HIDE_DELAY, start);
        auto_hide.playback_changed(true, start);
        auto_hide
    }

    #[test]
    fn starts_visible() {
        let auto_hide = AutoHide::new(DEFAULT_HIDE_DELAY, Instant::now());
        assert_eq!(auto_hide.visibility(), Visibility::Visible);
    }

    #[test]
    fn hides_exactly_after_delay_while_playing() {
        let start = Instant::now();
        let mut auto_hide = playing(start);

        assert!(!auto_hide.tick(start + ms(2999)));
        assert!(auto_hide.is_visible());

        assert!(auto_hide.tick(start + ms(3000)));
        assert_eq!(auto_hide.visibility(), Visibility::Hidden);
    }

    #[test]
    fn pointer_activity_restarts_the_window() {
        let start = Instant::now();
        let mut auto_hide = playing(start);

        auto_hide.pointer_moved(start + ms(2000));
        assert!(!auto_hide.tick(start + ms(3000)));
        assert!(!auto_hide.tick(start + ms(4999)));
        assert!(auto_hide.is_visible());
        assert!(auto_hide.tick(start + ms(5000)));
        assert!(!auto_hide.is_visible());
    }

    #[test]
    fn constant_activity_keeps_controls_up() {
        let start = Instant::now();
        let mut auto_hide = playing(start);

        for step in 1..=20 {
            let now = start + ms(step * 1000);
            auto_hide.pointer_moved(now);
            assert!(!auto_hide.tick(now));
        }
        assert!(auto_hide.is_visible());
    }

    #[test]
    fn never_hides_while_paused() {
        let start = Instant::now();
        let mut auto_hide = AutoHide::new(DEFAULT_HIDE_DELAY, start);

        assert!(!auto_hide.tick(start + ms(10_000)));
        auto_hide.pointer_left();
        assert!(auto_hide.is_visible());
    }

    #[test]
    fn pausing_shows_controls_again() {
        let start = Instant::now();
        let mut auto_hide = playing(start);
        auto_hide.tick(start + ms(3000));
        assert!(!auto_hide.is_visible());

        auto_hide.playback_changed(false, start + ms(3500));
        assert!(auto_hide.is_visible());
        assert!(!auto_hide.tick(start + ms(60_000)));
        assert!(auto_hide.is_visible());
    }

    #[test]
    fn pointer_leave_hides_immediately_while_playing() {
        let start = Instant::now();
        let mut auto_hide = playing(start);

        auto_hide.pointer_left();
        assert_eq!(auto_hide.visibility(), Visibility::Hidden);

        auto_hide.pointer_moved(start + ms(100));
        assert!(auto_hide.is_visible());
    }
}
