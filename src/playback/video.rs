use super::{MediaBackend, MediaError, MediaSnapshot};
use iced_video_player::Video;
use std::{path::Path, time::Duration};

/// GStreamer-backed video through `iced_video_player`.
pub struct VideoMedia {
    video: Video,
}

impl VideoMedia {
    pub fn open(path: &Path) -> Result<Self, MediaError> {
        let url = url::Url::from_file_path(path)
            .map_err(|_| MediaError::Open(format!("{} is not an absolute path", path.display())))?;
        let mut video = Video::new(&url).map_err(|err| MediaError::Open(err.to_string()))?;
        video.set_paused(true);
        Ok(VideoMedia { video })
    }

    #[inline]
    pub fn video(&self) -> &Video {
        &self.video
    }
}

impl MediaBackend for VideoMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        self.video.set_paused(false);
        Ok(())
    }

    fn pause(&mut self) {
        self.video.set_paused(true);
    }

    fn seek(&mut self, seconds: f64) -> Result<(), MediaError> {
        self.video
            .seek(Duration::from_secs_f64(seconds.max(0.0)))
            .map_err(|err| MediaError::Seek(err.to_string()))
    }

    fn set_volume(&mut self, volume: f64) {
        self.video.set_volume(volume);
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn snapshot(&self) -> MediaSnapshot {
        snapshot_of(
            self.video.position(),
            self.video.duration(),
            self.video.paused(),
            self.video.eos(),
        )
    }
}

/// A finished stream is reported as paused, since the pipeline itself never pauses at the end.
fn snapshot_of(position: Duration, duration: Duration, paused: bool, eos: bool) -> MediaSnapshot {
    MediaSnapshot {
        position: position.as_secs_f64(),
        duration: Some(duration.as_secs_f64()),
        paused: paused || eos,
    }
}
