use super::{Listener, Signal};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaError {
    #[error("playback was refused: {0}")]
    PlayRejected(String),
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("failed to open media: {0}")]
    Open(String),
}

/// What a backend currently reports about its resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaSnapshot {
    pub position: f64,
    pub duration: Option<f64>,
    pub paused: bool,
}

/// A native playable-media resource.
pub trait MediaBackend {
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64) -> Result<(), MediaError>;
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn snapshot(&self) -> MediaSnapshot;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    TimeUpdated(f64),
    DurationKnown(f64),
    Started,
    Stopped,
}

/// Adapter over a [`MediaBackend`] that turns polled backend state into
/// ordered change notifications.
pub struct MediaAdapter<B> {
    backend: B,
    events: Signal<MediaEvent>,
    last: Option<MediaSnapshot>,
}

impl<B: MediaBackend> MediaAdapter<B> {
    pub fn new(backend: B) -> Self {
        MediaAdapter {
            backend,
            events: Signal::new(),
            last: None,
        }
    }

    pub fn subscribe(&mut self) -> Listener<MediaEvent> {
        self.events.subscribe()
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Requests playback. A refusal leaves the resource paused and is only logged.
    pub fn play(&mut self) {
        if let Err(err) = self.backend.play() {
            log::warn!("{}", err);
        }
    }

    pub fn pause(&mut self) {
        self.backend.pause();
    }

    /// Seeks to `seconds`, clamped to the known duration. Returns the target.
    pub fn seek_to(&mut self, seconds: f64) -> f64 {
        let target = clamp_position(seconds, self.duration());
        if let Err(err) = self.backend.seek(target) {
            log::warn!("{}", err);
        }
        target
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.backend.set_volume(clamp_unit(volume));
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.backend.set_muted(muted);
    }

    pub fn current_time(&self) -> f64 {
        self.backend.snapshot().position.max(0.0)
    }

    pub fn duration(&self) -> Option<f64> {
        self.backend
            .snapshot()
            .duration
            .filter(|duration| duration.is_finite() && *duration > 0.0)
    }

    /// Compares the backend against the last snapshot and emits what changed.
    pub fn sync(&mut self) {
        let now = self.backend.snapshot();
        let duration = now.duration.filter(|d| d.is_finite() && *d > 0.0);
        let last = self.last.replace(MediaSnapshot { duration, ..now });

        if let Some(duration) = duration {
            if last.and_then(|last| last.duration) != Some(duration) {
                self.events.emit(MediaEvent::DurationKnown(duration));
            }
        }

        let was_paused = last.map_or(true, |last| last.paused);
        if was_paused != now.paused {
            self.events.emit(if now.paused {
                MediaEvent::Stopped
            } else {
                MediaEvent::Started
            });
        }

        if last.map_or(now.position > 0.0, |last| last.position != now.position) {
            self.events.emit(MediaEvent::TimeUpdated(now.position.max(0.0)));
        }
    }
}

pub fn clamp_position(seconds: f64, duration: Option<f64>) -> f64 {
    let seconds = if seconds.is_nan() { 0.0 } else { seconds };
    match duration {
        Some(duration) => seconds.clamp(0.0, duration),
        None => seconds.max(0.0),
    }
}

pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeMedia;
    use super::*;

    #[test]
    fn rejected_play_is_swallowed_and_stays_paused() {
        let mut media = FakeMedia::new(Some(60.0));
        media.reject_play = true;
        let mut adapter = MediaAdapter::new(media);
        let mut events = adapter.subscribe();

        adapter.play();
        adapter.sync();

        assert_eq!(adapter.backend().play_calls, 1);
        assert!(adapter.backend().paused);
        assert_eq!(events.drain(), vec![MediaEvent::DurationKnown(60.0)]);
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let mut adapter = MediaAdapter::new(FakeMedia::new(Some(100.0)));

        assert_eq!(adapter.seek_to(-5.0), 0.0);
        assert_eq!(adapter.seek_to(150.0), 100.0);
        assert_eq!(adapter.seek_to(42.5), 42.5);
        assert_eq!(adapter.backend().seeks, vec![0.0, 100.0, 42.5]);
    }

    #[test]
    fn seek_without_duration_only_clamps_below() {
        let mut adapter = MediaAdapter::new(FakeMedia::new(None));

        assert_eq!(adapter.seek_to(-1.0), 0.0);
        assert_eq!(adapter.seek_to(30.0), 30.0);
    }

    #[test]
    fn volume_is_clamped() {
        let mut adapter = MediaAdapter::new(FakeMedia::new(None));

        adapter.set_volume(1.7);
        assert_eq!(adapter.backend().volume, 1.0);
        adapter.set_volume(-0.2);
        assert_eq!(adapter.backend().volume, 0.0);
    }

    #[test]
    fn sync_emits_changes_in_order() {
        let mut adapter = MediaAdapter::new(FakeMedia::new(Some(90.0)));
        let mut events = adapter.subscribe();

        adapter.sync();
        assert_eq!(events.drain(), vec![MediaEvent::DurationKnown(90.0)]);

        adapter.play();
        adapter.backend_mut().position = 1.5;
        adapter.sync();
        assert_eq!(
            events.drain(),
            vec![MediaEvent::Started, MediaEvent::TimeUpdated(1.5)]
        );

        adapter.sync();
        assert!(events.drain().is_empty());

        adapter.pause();
        adapter.sync();
        assert_eq!(events.drain(), vec![MediaEvent::Stopped]);
    }

    #[test]
    fn duration_change_is_reported_again() {
        let mut adapter = MediaAdapter::new(FakeMedia::new(None));
        let mut events = adapter.subscribe();

        adapter.sync();
        assert!(events.drain().is_empty());

        adapter.backend_mut().duration = Some(12.0);
        adapter.sync();
        adapter.backend_mut().duration = Some(24.0);
        adapter.sync();

        assert_eq!(
            events.drain(),
            vec![MediaEvent::DurationKnown(12.0), MediaEvent::DurationKnown(24.0)]
        );
    }
}
