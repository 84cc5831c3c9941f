use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub volume: f64,
    pub skip_seconds: f64,
    pub controls_hide_delay_ms: u64,
    pub autoplay: bool,

    pub show_intro: bool,
    /// Intro clip. Without it the intro runs on a silent clock of `intro_seconds`.
    pub intro_path: Option<PathBuf>,
    pub intro_seconds: f64,

    /// Video played for every title. Without it playback is simulated.
    pub media_path: Option<PathBuf>,
    /// Directory that catalog image paths are resolved against.
    pub assets_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            volume: 1.0,
            skip_seconds: 10.0,
            controls_hide_delay_ms: 3000,
            autoplay: true,

            show_intro: true,
            intro_path: None,
            intro_seconds: 4.0,

            media_path: None,
            assets_dir: None,
            catalog_path: None,
        }
    }
}

impl UserSettings {
    pub fn load(storage: &Path) -> Self {
        std::fs::File::open(storage.join(SETTINGS_FILE))
            .ok()
            .and_then(|file| {
                serde_json::from_reader(file)
                    .inspect_err(|err| log::warn!("ignoring unreadable settings: {}", err))
                    .ok()
            })
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(storage.join(SETTINGS_FILE))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.controls_hide_delay_ms)
    }

    /// Resolves a catalog image path such as `/images/x.jpg` under the assets directory.
    pub fn asset(&self, url: &str) -> Option<PathBuf> {
        let path = self.assets_dir.as_ref()?.join(url.trim_start_matches('/'));
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(UserSettings::load(dir.path()), UserSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let settings = UserSettings {
            volume: 0.4,
            show_intro: false,
            media_path: Some(PathBuf::from("/videos/trailer.mp4")),
            ..UserSettings::default()
        };

        settings.save(dir.path()).unwrap();
        assert_eq!(UserSettings::load(dir.path()), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), r#"{"skip_seconds": 30.0}"#).unwrap();

        let settings = UserSettings::load(dir.path());
        assert_eq!(settings.skip_seconds, 30.0);
        assert_eq!(settings.controls_hide_delay_ms, 3000);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{").unwrap();

        assert_eq!(UserSettings::load(dir.path()), UserSettings::default());
    }

    #[test]
    fn assets_resolve_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/poster.jpg"), b"").unwrap();

        let settings = UserSettings {
            assets_dir: Some(dir.path().to_path_buf()),
            ..UserSettings::default()
        };

        assert_eq!(
            settings.asset("/images/poster.jpg"),
            Some(dir.path().join("images/poster.jpg"))
        );
        assert_eq!(settings.asset("/images/missing.jpg"), None);
        assert_eq!(UserSettings::default().asset("/images/poster.jpg"), None);
    }
}
