use super::{Listener, MediaAdapter, MediaBackend, MediaEvent};

/// Everything the player screen renders about one playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSession {
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: f64,
    pub current_time: f64,
    pub duration: f64,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        PlaybackSession {
            is_playing: false,
            is_muted: false,
            volume: 1.0,
            current_time: 0.0,
            duration: 0.0,
            is_fullscreen: false,
            controls_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Audible,
}

/// Routes user intents to the media adapter and folds the adapter's
/// notifications back into a [`PlaybackSession`].
///
/// Play state is never set optimistically: `is_playing` follows the
/// `Started`/`Stopped` notifications only.
pub struct PlaybackControls<B> {
    adapter: MediaAdapter<B>,
    events: Listener<MediaEvent>,
    session: PlaybackSession,
    muted_by_zero: bool,
}

impl<B: MediaBackend> PlaybackControls<B> {
    pub fn new(mut adapter: MediaAdapter<B>, volume: f64) -> Self {
        let events = adapter.subscribe();
        let mut controls = PlaybackControls {
            adapter,
            events,
            session: PlaybackSession::default(),
            muted_by_zero: false,
        };
        controls.set_volume(volume);
        controls
    }

    #[inline]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    #[inline]
    pub fn adapter(&self) -> &MediaAdapter<B> {
        &self.adapter
    }

    #[inline]
    pub fn adapter_mut(&mut self) -> &mut MediaAdapter<B> {
        &mut self.adapter
    }

    pub fn play(&mut self) {
        self.adapter.play();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.session.is_playing {
            self.adapter.pause();
        } else {
            self.adapter.play();
        }
    }

    /// Seeks relative to the adapter's current time. Returns the clamped target.
    pub fn skip(&mut self, delta: f64) -> f64 {
        let target = self.adapter.current_time() + delta;
        self.adapter.seek_to(target)
    }

    /// Seeks to a fraction of the duration. Does nothing until the duration is known.
    pub fn scrub_to(&mut self, fraction: f64) -> Option<f64> {
        if self.session.duration <= 0.0 {
            return None;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Some(self.adapter.seek_to(fraction * self.session.duration))
    }

    pub fn set_volume(&mut self, volume: f64) {
        let volume = super::clamp_unit(volume);
        self.adapter.set_volume(volume);
        self.session.volume = volume;

        if volume == 0.0 {
            if !self.session.is_muted {
                self.muted_by_zero = true;
            }
            self.apply_mute(true);
        } else if self.muted_by_zero {
            self.muted_by_zero = false;
            self.apply_mute(false);
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted_by_zero = false;
        self.apply_mute(!self.session.is_muted);
    }

    fn apply_mute(&mut self, muted: bool) {
        self.adapter.set_muted(muted);
        self.session.is_muted = muted;
    }

    /// Polls the adapter and applies every notification it produced.
    pub fn refresh(&mut self) -> Vec<MediaEvent> {
        self.adapter.sync();
        let events = self.events.drain();
        for event in &events {
            self.apply(*event);
        }
        events
    }

    pub fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdated(time) => {
                self.session.current_time = self.clamp_to_duration(time);
            }
            MediaEvent::DurationKnown(duration) => {
                self.session.duration = duration.max(0.0);
                self.session.current_time = self.clamp_to_duration(self.session.current_time);
            }
            MediaEvent::Started => self.session.is_playing = true,
            MediaEvent::Stopped => self.session.is_playing = false,
        }
    }

    fn clamp_to_duration(&self, time: f64) -> f64 {
        if self.session.duration > 0.0 {
            time.clamp(0.0, self.session.duration)
        } else {
            time.max(0.0)
        }
    }

    pub fn progress_percent(&self) -> f64 {
        if self.session.duration > 0.0 {
            self.session.current_time / self.session.duration * 100.0
        } else {
            0.0
        }
    }

    pub fn play_icon(&self) -> PlayIcon {
        if self.session.is_playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        }
    }

    pub fn volume_icon(&self) -> VolumeIcon {
        if self.session.is_muted || self.session.volume == 0.0 {
            VolumeIcon::Muted
        } else {
            VolumeIcon::Audible
        }
    }

    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.session.current_time),
            format_time(self.session.duration)
        )
    }
}

/// `H:MM:SS` from one hour up, `M:SS` below.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::FakeMedia;

    fn controls(duration: Option<f64>) -> PlaybackControls<FakeMedia> {
        let mut controls = PlaybackControls::new(MediaAdapter::new(FakeMedia::new(duration)), 1.0);
        controls.refresh();
        controls
    }

    #[test]
    fn format_time_matches_player_clock() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(599.9), "9:59");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(3661.0), "1:01:01");
        assert_eq!(format_time(36000.0), "10:00:00");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn play_state_waits_for_confirmation() {
        let mut controls = controls(Some(120.0));
        assert!(!controls.session().is_playing);

        controls.toggle_play_pause();
        assert!(!controls.session().is_playing);
        controls.refresh();
        assert!(controls.session().is_playing);

        controls.toggle_play_pause();
        assert!(controls.session().is_playing);
        controls.refresh();
        assert!(!controls.session().is_playing);
    }

    #[test]
    fn rejected_play_leaves_session_paused() {
        let mut controls = controls(Some(120.0));
        controls.adapter_mut().backend_mut().reject_play = true;

        controls.toggle_play_pause();
        controls.refresh();

        assert!(!controls.session().is_playing);
        assert_eq!(controls.play_icon(), PlayIcon::Play);
    }

    #[test]
    fn skip_is_clamped_to_media_bounds() {
        let mut controls = controls(Some(100.0));

        assert_eq!(controls.skip(-10.0), 0.0);
        assert_eq!(controls.skip(10.0), 10.0);
        assert_eq!(controls.skip(10.0), 20.0);
        assert_eq!(controls.skip(500.0), 100.0);

        for start in [0.0, 3.0, 50.0, 97.0, 100.0] {
            for delta in [-200.0, -10.0, 10.0, 200.0] {
                controls.adapter_mut().backend_mut().position = start;
                let result = controls.skip(delta);
                assert!((0.0..=100.0).contains(&result), "{start} + {delta} -> {result}");
            }
        }
    }

    #[test]
    fn scrub_maps_fraction_onto_duration() {
        let mut controls = controls(Some(200.0));

        assert_eq!(controls.scrub_to(0.25), Some(50.0));
        assert_eq!(controls.scrub_to(1.5), Some(200.0));
        assert_eq!(controls.scrub_to(-1.0), Some(0.0));
    }

    #[test]
    fn scrub_is_a_no_op_without_duration() {
        let mut controls = controls(None);

        assert_eq!(controls.scrub_to(0.5), None);
        assert!(controls.adapter().backend().seeks.is_empty());
    }

    #[test]
    fn volume_reads_back_and_zero_mutes() {
        let mut controls = controls(None);

        for volume in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
            controls.set_volume(volume);
            assert_eq!(controls.session().volume, volume);
            assert_eq!(controls.adapter().backend().volume, volume);
        }

        controls.set_volume(0.0);
        assert!(controls.session().is_muted);
        assert!(controls.adapter().backend().muted);
        assert_eq!(controls.volume_icon(), VolumeIcon::Muted);
    }

    #[test]
    fn raising_volume_undoes_zero_volume_mute_only() {
        let mut controls = controls(None);

        controls.set_volume(0.0);
        controls.set_volume(0.4);
        assert!(!controls.session().is_muted);

        controls.toggle_mute();
        controls.set_volume(0.0);
        controls.set_volume(0.6);
        assert!(controls.session().is_muted);
        assert_eq!(controls.session().volume, 0.6);
    }

    #[test]
    fn mute_does_not_touch_volume() {
        let mut controls = controls(None);
        controls.set_volume(0.7);

        controls.toggle_mute();
        assert!(controls.session().is_muted);
        assert_eq!(controls.session().volume, 0.7);

        controls.toggle_mute();
        assert!(!controls.session().is_muted);
    }

    #[test]
    fn time_never_exceeds_duration() {
        let mut controls = controls(None);

        controls.apply(MediaEvent::TimeUpdated(30.0));
        assert_eq!(controls.session().current_time, 30.0);

        controls.apply(MediaEvent::DurationKnown(20.0));
        assert_eq!(controls.session().current_time, 20.0);

        controls.apply(MediaEvent::TimeUpdated(25.0));
        assert_eq!(controls.session().current_time, 20.0);
        assert_eq!(controls.progress_percent(), 100.0);
    }

    #[test]
    fn derived_labels() {
        let mut controls = controls(Some(3725.0));
        controls.apply(MediaEvent::TimeUpdated(65.0));

        assert_eq!(controls.time_label(), "1:05 / 1:02:05");
        assert!((controls.progress_percent() - 65.0 / 3725.0 * 100.0).abs() < 1e-9);
    }
}
