use super::{MediaBackend, MediaError, MediaSnapshot};
use std::time::Instant;

/// A silent media clock standing in for a real video.
///
/// Position advances with the ticks fed to [`SimulatedMedia::advance`] while
/// unpaused, and playback stops on its own at the end.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    duration: f64,
    position: f64,
    paused: bool,
    volume: f64,
    muted: bool,
    refuse_play: bool,
    last_tick: Option<Instant>,
}

impl SimulatedMedia {
    pub fn new(duration: f64) -> Self {
        SimulatedMedia {
            duration: duration.max(0.0),
            position: 0.0,
            paused: true,
            volume: 1.0,
            muted: false,
            refuse_play: false,
            last_tick: None,
        }
    }

    /// Makes every `play` request fail, like a blocked autoplay.
    pub fn refusing_play(mut self) -> Self {
        self.refuse_play = true;
        self
    }

    pub fn advance(&mut self, now: Instant) {
        if self.paused {
            self.last_tick = None;
            return;
        }

        if let Some(last) = self.last_tick {
            let elapsed = now.saturating_duration_since(last).as_secs_f64();
            self.position = (self.position + elapsed).min(self.duration);
            if self.position >= self.duration {
                self.paused = true;
            }
        }
        self.last_tick = (!self.paused).then_some(now);
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[inline]
    pub fn muted(&self) -> bool {
        self.muted
    }
}

impl MediaBackend for SimulatedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        if self.refuse_play {
            return Err(MediaError::PlayRejected(String::from(
                "simulated media refuses playback",
            )));
        }
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
        self.last_tick = None;
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.position = seconds.clamp(0.0, self.duration);
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn snapshot(&self) -> MediaSnapshot {
        MediaSnapshot {
            position: self.position,
            duration: (self.duration > 0.0).then_some(self.duration),
            paused: self.paused,
        }
    }
}
