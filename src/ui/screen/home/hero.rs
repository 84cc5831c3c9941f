use std::time::{Duration, Instant};

/// How long the artwork shows before the preview video takes over.
pub const REVEAL_DELAY: Duration = Duration::from_secs(3);
/// Share of the banner that must be on screen for the preview to play.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;
/// The bottom of the viewport that doesn't count as "on screen".
pub const BOTTOM_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewIntent {
    Play,
    Pause,
}

/// Play/pause policy for the featured title's preview.
///
/// The preview only plays once revealed and while enough of the banner is visible.
/// Each method returns an intent only when the desired state changes.
#[derive(Debug, Clone)]
pub struct HeroPreview {
    reveal_at: Instant,
    revealed: bool,
    in_viewport: bool,
    playing: bool,
}

impl HeroPreview {
    pub fn new(now: Instant) -> Self {
        HeroPreview {
            reveal_at: now + REVEAL_DELAY,
            revealed: false,
            in_viewport: true,
            playing: false,
        }
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn tick(&mut self, now: Instant) -> Option<PreviewIntent> {
        if !self.revealed && now >= self.reveal_at {
            self.revealed = true;
            log::debug!("revealing hero preview");
        }
        self.reconcile()
    }

    pub fn set_visible_ratio(&mut self, ratio: f32) -> Option<PreviewIntent> {
        self.in_viewport = ratio >= VISIBILITY_THRESHOLD;
        self.reconcile()
    }

    fn reconcile(&mut self) -> Option<PreviewIntent> {
        let want = self.revealed && self.in_viewport;
        if want == self.playing {
            return None;
        }
        self.playing = want;
        Some(if want {
            PreviewIntent::Play
        } else {
            PreviewIntent::Pause
        })
    }
}

/// Fraction of a banner at `top..top + height` (content coordinates) that sits inside
/// the viewport, ignoring the bottom [`BOTTOM_MARGIN`].
pub fn visible_ratio(top: f32, height: f32, scroll_y: f32, viewport_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }
    let start = top - scroll_y;
    let end = start + height;
    let visible = end.min(viewport_height - BOTTOM_MARGIN) - start.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_only_after_reveal() {
        let start = Instant::now();
        let mut preview = HeroPreview::new(start);

        assert_eq!(preview.tick(start + Duration::from_millis(2999)), None);
        assert!(!preview.is_revealed());
        assert_eq!(preview.tick(start + REVEAL_DELAY), Some(PreviewIntent::Play));
        assert_eq!(preview.tick(start + Duration::from_secs(4)), None);
    }

    #[test]
    fn scrolling_away_pauses_and_back_resumes() {
        let start = Instant::now();
        let mut preview = HeroPreview::new(start);
        preview.tick(start + REVEAL_DELAY);

        assert_eq!(preview.set_visible_ratio(0.3), Some(PreviewIntent::Pause));
        assert_eq!(preview.set_visible_ratio(0.2), None);
        assert_eq!(preview.set_visible_ratio(0.5), Some(PreviewIntent::Play));
    }

    #[test]
    fn hidden_banner_stays_paused_on_reveal() {
        let start = Instant::now();
        let mut preview = HeroPreview::new(start);

        assert_eq!(preview.set_visible_ratio(0.0), None);
        assert_eq!(preview.tick(start + REVEAL_DELAY), None);
        assert!(preview.is_revealed());
        assert_eq!(preview.set_visible_ratio(1.0), Some(PreviewIntent::Play));
    }

    #[test]
    fn ratio_discounts_bottom_margin() {
        assert_eq!(visible_ratio(0.0, 400.0, 0.0, 1000.0), 1.0);
        assert_eq!(visible_ratio(0.0, 400.0, 200.0, 1000.0), 0.5);
        assert_eq!(visible_ratio(0.0, 400.0, 0.0, 300.0), 0.5);
        assert_eq!(visible_ratio(0.0, 400.0, 500.0, 1000.0), 0.0);
    }
}
