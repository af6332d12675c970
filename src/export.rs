//! Downloadable outputs: PNG renderings (with their captions stored as PNG
//! text chunks) and their download names.

use image::RgbaImage;
use png::{BitDepth, ColorType, Encoder};

use crate::analysis::story_meta;
use crate::color::Rgb;
use crate::error::{PaletteError, Result};
use crate::render;

/// The files the app can produce, with their canonical download names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    PaletteStrip,
    StoryPoster,
    Gradient,
    Wallpaper,
    ThemeCss,
    ThemeJson,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::PaletteStrip => "palette.png",
            ExportKind::StoryPoster => "palette_story.png",
            ExportKind::Gradient => "gradient.png",
            ExportKind::Wallpaper => "wallpaper.png",
            ExportKind::ThemeCss => "theme.css",
            ExportKind::ThemeJson => "theme.json",
        }
    }
}

/// Encode an RGBA image as PNG, attaching `(keyword, text)` pairs as `tEXt` chunks.
pub fn encode_png(img: &RgbaImage, text: &[(&str, String)]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = Encoder::new(&mut buf, img.width(), img.height());
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        for (keyword, value) in text {
            encoder
                .add_text_chunk(keyword.to_string(), value.clone())
                .map_err(|e| PaletteError::EncodePng(e.to_string()))?;
        }
        let mut writer = encoder.write_header().map_err(|e| PaletteError::EncodePng(e.to_string()))?;
        writer
            .write_image_data(img.as_raw())
            .map_err(|e| PaletteError::EncodePng(e.to_string()))?;
        writer.finish().map_err(|e| PaletteError::EncodePng(e.to_string()))?;
    }
    Ok(buf)
}

fn hex_caption(palette: &[Rgb]) -> String {
    palette.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join(", ")
}

pub fn strip_png(palette: &[Rgb], width: u32, height: u32) -> Result<Vec<u8>> {
    let img = render::palette_strip(palette, width, height)?;
    encode_png(&img, &[("Comment", hex_caption(palette))])
}

pub fn poster_png(palette: &[Rgb]) -> Result<Vec<u8>> {
    let img = render::story_poster(palette)?;
    let meta = story_meta(palette);
    encode_png(
        &img,
        &[
            ("Title", meta.title),
            ("Description", meta.mood),
            ("Comment", meta.names.join(", ")),
        ],
    )
}

pub fn gradient_png(palette: &[Rgb], width: u32, height: u32) -> Result<Vec<u8>> {
    let img = render::linear_gradient(palette, width, height)?;
    encode_png(&img, &[("Comment", hex_caption(palette))])
}

pub fn wallpaper_png(palette: &[Rgb], width: u32, height: u32) -> Result<Vec<u8>> {
    let img = render::wallpaper(palette, width, height)?;
    encode_png(&img, &[("Comment", hex_caption(palette))])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn strip_png_decodes_and_carries_hex_codes() {
        let palette = [Rgb::new(0xF2, 0xC1, 0x4E), Rgb::new(0x03, 0x71, 0x9C)];
        let bytes = strip_png(&palette, 30, 10).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (30, 10));
        assert_eq!(img.get_pixel(0, 0).0, [0xF2, 0xC1, 0x4E, 255]);
        assert!(contains(&bytes, b"tEXtComment\0#F2C14E, #03719C"));
    }

    #[test]
    fn poster_png_carries_story_metadata() {
        let bytes = poster_png(&[Rgb::new(0xF2, 0xC1, 0x4E)]).unwrap();
        assert!(contains(&bytes, b"tEXtTitle\0Gold"));
        assert!(contains(&bytes, b"tEXtDescription\0"));
    }

    #[test]
    fn empty_palette_is_an_error() {
        assert!(matches!(gradient_png(&[], 10, 10), Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn download_names() {
        assert_eq!(ExportKind::PaletteStrip.file_name(), "palette.png");
        assert_eq!(ExportKind::StoryPoster.file_name(), "palette_story.png");
        assert_eq!(ExportKind::ThemeJson.file_name(), "theme.json");
    }
}
