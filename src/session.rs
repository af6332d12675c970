//! The current palette and the user actions that read or replace it.

use tracing::{info, warn};

use crate::analysis::{self, PaletteMeta, StoryMeta};
use crate::brand::{self, BrandMatch};
use crate::color::{Palette, Rgb, hex_list};
use crate::error::{PaletteError, Result};
use crate::extract::{self, ExtractOptions};
use crate::store::PaletteStore;
use crate::theme::{self, Theme};
use crate::tone::Tone;

pub struct Session {
    palette: Palette,
    options: ExtractOptions,
    store: Option<PaletteStore>,
}

impl Session {
    pub fn new(options: ExtractOptions, store: Option<PaletteStore>) -> Self {
        Self { palette: Vec::new(), options, store }
    }

    /// Session seeded with an explicit palette, not persisted.
    pub fn with_palette(palette: Palette) -> Self {
        Self { palette, options: ExtractOptions::default(), store: None }
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// Reload the last stored palette. Returns whether one was found.
    pub fn restore(&mut self) -> bool {
        match self.store.as_ref().and_then(PaletteStore::load) {
            Some(palette) => {
                info!(colors = palette.len(), "restored last palette");
                self.palette = palette;
                true
            }
            None => false,
        }
    }

    fn require_palette(&self) -> Result<&[Rgb]> {
        if self.palette.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(&self.palette)
    }

    fn replace(&mut self, palette: Palette) -> PaletteMeta {
        self.palette = palette;
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.palette) {
                warn!(error = %err, "failed to persist palette");
            }
        }
        analysis::palette_meta(&self.palette)
    }

    /// Extract a palette from an encoded image, make it current and persist it.
    pub fn analyze_image(&mut self, bytes: &[u8]) -> Result<PaletteMeta> {
        let palette = extract::extract_from_image(bytes, &self.options)?;
        Ok(self.replace(palette))
    }

    /// Reorder the current palette by hue. The sorted order is not persisted.
    pub fn sort(&mut self) -> Result<&[Rgb]> {
        let sorted = analysis::smart_sort(self.require_palette()?);
        self.palette = sorted;
        Ok(&self.palette)
    }

    pub fn meta(&self) -> Result<PaletteMeta> {
        Ok(analysis::palette_meta(self.require_palette()?))
    }

    pub fn names(&self) -> Result<Vec<String>> {
        Ok(analysis::color_names(self.require_palette()?))
    }

    pub fn story(&self) -> Result<StoryMeta> {
        Ok(analysis::story_meta(self.require_palette()?))
    }

    pub fn brands(&self) -> Result<Vec<BrandMatch>> {
        Ok(brand::brand_matches(self.require_palette()?))
    }

    /// Theme of the current palette; an empty palette gets the fallback roles.
    pub fn theme(&self) -> Theme {
        theme::build_theme(&self.palette)
    }

    pub fn hex_list(&self) -> String {
        hex_list(&self.palette)
    }

    pub fn tones(&self, duration: f32) -> Vec<Tone> {
        self.palette.iter().map(|&c| Tone::from_color(c, duration)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_blue_png() -> Vec<u8> {
        let img = image::RgbaImage::from_fn(16, 16, |x, _| {
            if x < 12 { image::Rgba([230, 20, 20, 255]) } else { image::Rgba([20, 20, 230, 255]) }
        });
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn analyze_persists_and_restore_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ExtractOptions { k: 2, sample_step: 1, ..Default::default() };

        let mut session = Session::new(opts.clone(), Some(PaletteStore::in_dir(dir.path())));
        let meta = session.analyze_image(&red_blue_png()).unwrap();
        assert_eq!(session.palette().len(), 2);
        assert_eq!(meta.names.len(), 2);

        let mut fresh = Session::new(opts, Some(PaletteStore::in_dir(dir.path())));
        assert!(fresh.restore());
        assert_eq!(fresh.palette(), session.palette());
    }

    #[test]
    fn restore_without_store_is_a_no_op() {
        let mut session = Session::new(ExtractOptions::default(), None);
        assert!(!session.restore());
        assert!(session.palette().is_empty());
    }

    #[test]
    fn palette_actions_require_a_palette() {
        let mut session = Session::new(ExtractOptions::default(), None);
        assert!(matches!(session.sort(), Err(PaletteError::EmptyPalette)));
        assert!(matches!(session.names(), Err(PaletteError::EmptyPalette)));
        assert!(matches!(session.meta(), Err(PaletteError::EmptyPalette)));
        assert!(matches!(session.story(), Err(PaletteError::EmptyPalette)));
        assert!(matches!(session.brands(), Err(PaletteError::EmptyPalette)));
        assert_eq!(session.theme().get("primary"), Some("#7C5CFF"));
        assert_eq!(session.hex_list(), "");
    }

    #[test]
    fn sort_replaces_current_palette() {
        let blue = Rgb::new(30, 60, 220);
        let red = Rgb::new(220, 20, 40);
        let mut session = Session::with_palette(vec![blue, red]);
        assert_eq!(session.sort().unwrap(), &[red, blue]);
        assert_eq!(session.hex_list(), "#DC1428\n#1E3CDC");
        assert_eq!(session.tones(0.3).len(), 2);
        assert_eq!(session.story().unwrap().names.len(), 2);
        assert_eq!(session.brands().unwrap()[1].input, blue);
    }
}
