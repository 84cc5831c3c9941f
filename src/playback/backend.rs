use super::{MediaBackend, MediaError, MediaSnapshot, SimulatedMedia};
use std::{path::Path, time::Instant};

#[cfg(feature = "video")]
use super::VideoMedia;

/// The backends the application can play through.
pub enum Backend {
    Simulated(SimulatedMedia),
    #[cfg(feature = "video")]
    Video(VideoMedia),
}

impl Backend {
    /// Opens `path` with the video toolkit when it is compiled in, otherwise (or
    /// when opening fails) plays a simulated clock of `fallback_seconds`.
    pub fn open(path: Option<&Path>, fallback_seconds: f64) -> Self {
        match path {
            Some(path) => match Self::open_video(path) {
                Ok(backend) => backend,
                Err(err) => {
                    log::warn!("{}; falling back to simulated playback", err);
                    Backend::Simulated(SimulatedMedia::new(fallback_seconds))
                }
            },
            None => Backend::Simulated(SimulatedMedia::new(fallback_seconds)),
        }
    }

    #[cfg(feature = "video")]
    fn open_video(path: &Path) -> Result<Self, MediaError> {
        VideoMedia::open(path).map(Backend::Video)
    }

    #[cfg(not(feature = "video"))]
    fn open_video(path: &Path) -> Result<Self, MediaError> {
        Err(MediaError::Open(format!(
            "{}: built without the `video` feature",
            path.display()
        )))
    }

    /// Drives clock-based backends. Real videos advance on their own.
    pub fn advance(&mut self, now: Instant) {
        match self {
            Backend::Simulated(media) => media.advance(now),
            #[cfg(feature = "video")]
            Backend::Video(_) => {}
        }
    }
}

impl MediaBackend for Backend {
    fn play(&mut self) -> Result<(), MediaError> {
        match self {
            Backend::Simulated(media) => media.play(),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.play(),
        }
    }

    fn pause(&mut self) {
        match self {
            Backend::Simulated(media) => media.pause(),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.pause(),
        }
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        match self {
            Backend::Simulated(media) => media.seek(seconds),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.seek(seconds),
        }
    }

    fn set_volume(&mut self, volume: f64) {
        match self {
            Backend::Simulated(media) => media.set_volume(volume),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.set_volume(volume),
        }
    }

    fn set_muted(&mut self, muted: bool) {
        match self {
            Backend::Simulated(media) => media.set_muted(muted),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.set_muted(muted),
        }
    }

    fn snapshot(&self) -> MediaSnapshot {
        match self {
            Backend::Simulated(media) => media.snapshot(),
            #[cfg(feature = "video")]
            Backend::Video(media) => media.snapshot(),
        }
    }
}
