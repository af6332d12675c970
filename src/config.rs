//! Runtime settings: extraction tuning, render sizes and where the palette is stored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractOptions;
use crate::render;

/// Environment variable that overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "PIXELPALETTE_CONFIG_PATH";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size { width, height }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSizes {
    pub strip: Size,
    pub gradient: Size,
    pub wallpaper: Size,
}

impl Default for RenderSizes {
    fn default() -> Self {
        Self {
            strip: render::STRIP_SIZE.into(),
            gradient: render::GRADIENT_SIZE.into(),
            wallpaper: render::WALLPAPER_SIZE.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extract: ExtractOptions,
    pub render: RenderSizes,
    /// Directory for the stored palette; the platform data dir when unset.
    pub storage_dir: Option<PathBuf>,
    /// Number of colors produced by harmony generation and mixing.
    pub generated_colors: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            render: RenderSizes::default(),
            storage_dir: None,
            generated_colors: 5,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{env, fs, io::ErrorKind, path::PathBuf};

    use tracing::{info, warn};

    use super::{CONFIG_PATH_ENV, Settings};
    use crate::store::PaletteStore;

    fn resolve_config_path() -> Option<PathBuf> {
        env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("pixelpalette").join("config.json")))
    }

    impl Settings {
        /// Load settings from disk, falling back to defaults when the file is
        /// missing or unusable.
        pub fn load() -> Self {
            match resolve_config_path() {
                Some(path) => Self::load_from(&path),
                None => Self::default(),
            }
        }

        pub fn load_from(path: &std::path::Path) -> Self {
            match fs::read_to_string(path) {
                Ok(contents) => match Settings::from_json(&contents) {
                    Ok(settings) => {
                        info!(path = %path.display(), "loaded settings");
                        settings
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "failed to parse settings; using defaults");
                        Self::default()
                    }
                },
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    info!(path = %path.display(), "settings file not found; using defaults");
                    Self::default()
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to read settings; using defaults");
                    Self::default()
                }
            }
        }

        pub fn store(&self) -> Option<PaletteStore> {
            match &self.storage_dir {
                Some(dir) => Some(PaletteStore::in_dir(dir)),
                None => PaletteStore::default_location(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"extract": {"k": 8}, "render": {"strip": {"width": 800, "height": 200}}}"#)
            .unwrap();
        assert_eq!(settings.extract.k, 8);
        assert_eq!(settings.extract.sample_step, ExtractOptions::default().sample_step);
        assert_eq!(settings.render.strip, Size { width: 800, height: 200 });
        assert_eq!(settings.render.wallpaper, Size::from(render::WALLPAPER_SIZE));
        assert_eq!(settings.generated_colors, 5);
        assert_eq!(settings.storage_dir, None);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn storage_dir_selects_store_location() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            storage_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        let store = settings.store().unwrap();
        assert!(store.path().starts_with(dir.path()));
    }
}
