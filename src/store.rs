//! Persistence of the last extracted palette.
//!
//! The browser keeps it in `localStorage` under [`STORAGE_KEY`]; native
//! builds keep the same JSON in a file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::color::{Palette, Rgb};
use crate::error::{PaletteError, Result};

pub const STORAGE_KEY: &str = "pp:last";
const FILE_NAME: &str = "pp_last.json";

/// Serialize a palette as `[[r,g,b], ...]`.
pub fn encode_palette(palette: &[Rgb]) -> Result<String> {
    Ok(serde_json::to_string(palette)?)
}

pub fn decode_palette(json: &str) -> Result<Palette> {
    Ok(serde_json::from_str(json)?)
}

/// File-backed palette storage.
#[derive(Clone, Debug)]
pub struct PaletteStore {
    path: PathBuf,
}

impl PaletteStore {
    /// Store the palette file inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(FILE_NAME) }
    }

    /// Default location under the user's data directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::in_dir(d.join("pixelpalette")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored palette. Missing, unreadable and malformed files all
    /// read as "nothing stored".
    pub fn load(&self) -> Option<Palette> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored palette");
                return None;
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read stored palette");
                return None;
            }
        };
        match decode_palette(&contents) {
            Ok(palette) if palette.is_empty() => None,
            Ok(palette) => Some(palette),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring malformed stored palette");
                None
            }
        }
    }

    /// Replace the stored palette. The file is written beside its final
    /// location and renamed into place.
    pub fn save(&self, palette: &[Rgb]) -> Result<()> {
        let storage_err = |source| PaletteError::Storage {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encode_palette(palette)?).map_err(storage_err)?;
        fs::rename(&tmp, &self.path).map_err(storage_err)?;
        debug!(path = %self.path.display(), colors = palette.len(), "saved palette");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PaletteError::Storage {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}
