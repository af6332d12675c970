//! Raster renderings of a palette: swatch strip, story poster, linear
//! gradient and radial wallpaper.
//!
//! Every renderer draws into an [`RgbaImage`]; encoding happens in
//! [`crate::export`].

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::color::Rgb;
use crate::error::{PaletteError, Result};

pub const STRIP_SIZE: (u32, u32) = (1500, 360);
pub const POSTER_SIZE: (u32, u32) = (1500, 900);
pub const GRADIENT_SIZE: (u32, u32) = (1600, 400);
pub const WALLPAPER_SIZE: (u32, u32) = (1440, 3120);

const POSTER_BACKGROUND: Rgb = Rgb::new(18, 18, 18);
const POSTER_MARGIN: u32 = 100;
const POSTER_SWATCH_TOP: u32 = 180;
const POSTER_SWATCH_HEIGHT: u32 = 420;
const POSTER_SWATCH_GAP: u32 = 20;

const WALLPAPER_OPACITY: f32 = 0.8;

fn check(palette: &[Rgb], width: u32, height: u32) -> Result<()> {
    if palette.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }
    if width == 0 || height == 0 {
        return Err(PaletteError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn opaque(c: Rgb) -> Rgba<u8> {
    Rgba([c.r(), c.g(), c.b(), 255])
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb([
        lerp_channel(a.r(), b.r(), t),
        lerp_channel(a.g(), b.g(), t),
        lerp_channel(a.b(), b.b(), t),
    ])
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Equal-width vertical bands, one per color.
///
/// Bands are `floor(width / n)` wide; columns left over on the right stay
/// transparent.
pub fn palette_strip(palette: &[Rgb], width: u32, height: u32) -> Result<RgbaImage> {
    check(palette, width, height)?;
    let band = width / palette.len() as u32;
    let mut img = RgbaImage::new(width, height);
    for (i, &c) in palette.iter().enumerate() {
        fill_rect(&mut img, i as u32 * band, 0, band, height, opaque(c));
    }
    Ok(img)
}

/// Dark poster with a row of tall swatches.
pub fn story_poster(palette: &[Rgb]) -> Result<RgbaImage> {
    let (width, height) = POSTER_SIZE;
    check(palette, width, height)?;
    let mut img = RgbaImage::from_pixel(width, height, opaque(POSTER_BACKGROUND));
    let band = (width - 2 * POSTER_MARGIN) / palette.len() as u32;
    let swatch_w = band.saturating_sub(POSTER_SWATCH_GAP);
    for (i, &c) in palette.iter().enumerate() {
        let x = POSTER_MARGIN + i as u32 * band;
        fill_rect(&mut img, x, POSTER_SWATCH_TOP, swatch_w, POSTER_SWATCH_HEIGHT, opaque(c));
    }
    Ok(img)
}

/// Diagonal gradient from the top-left to the bottom-right corner with
/// evenly spaced color stops.
pub fn linear_gradient(palette: &[Rgb], width: u32, height: u32) -> Result<RgbaImage> {
    check(palette, width, height)?;
    if let [only] = palette {
        return Ok(RgbaImage::from_pixel(width, height, opaque(*only)));
    }

    let (w, h) = (width as f32, height as f32);
    let norm = w * w + h * h;
    let segments = (palette.len() - 1) as f32;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let t = (((x as f32 + 0.5) * w + (y as f32 + 0.5) * h) / norm).clamp(0.0, 1.0);
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(palette.len() - 2);
        opaque(lerp(palette[idx], palette[idx + 1], pos - idx as f32))
    }))
}

/// Concentric discs, largest first, each a radial fade from its color to
/// black, laid over each other at 80% opacity.
pub fn wallpaper(palette: &[Rgb], width: u32, height: u32) -> Result<RgbaImage> {
    check(palette, width, height)?;
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let max_r = width.max(height) as f32;
    let n = palette.len() as f32;

    let keep = 1.0 - WALLPAPER_OPACITY;
    let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
        let d = (dx * dx + dy * dy).sqrt();
        // Premultiplied RGBA, starting fully transparent.
        let mut px = [0.0f32; 4];
        for (i, &c) in palette.iter().enumerate() {
            let radius = max_r * (1.0 - i as f32 / n);
            if d > radius {
                continue;
            }
            let src = lerp(c, Rgb::BLACK, d / radius);
            for (ch, v) in src.0.iter().enumerate() {
                px[ch] = *v as f32 / 255.0 * WALLPAPER_OPACITY + px[ch] * keep;
            }
            px[3] = WALLPAPER_OPACITY + px[3] * keep;
        }
        let [r, g, b, a] = px;
        if a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), to_u8(a)])
    });
    debug!(width, height, layers = palette.len(), "rendered wallpaper");
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);
    const GREEN: Rgb = Rgb::new(0, 255, 0);

    #[test]
    fn renderers_reject_empty_palettes() {
        assert!(matches!(palette_strip(&[], 10, 10), Err(PaletteError::EmptyPalette)));
        assert!(matches!(story_poster(&[]), Err(PaletteError::EmptyPalette)));
        assert!(matches!(linear_gradient(&[], 10, 10), Err(PaletteError::EmptyPalette)));
        assert!(matches!(wallpaper(&[], 10, 10), Err(PaletteError::EmptyPalette)));
        assert!(matches!(
            palette_strip(&[RED], 0, 10),
            Err(PaletteError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn strip_draws_equal_bands_and_leaves_remainder_clear() {
        let img = palette_strip(&[RED, GREEN, BLUE], 10, 4).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(4, 3), &Rgba([0, 255, 0, 255]));
        assert_eq!(img.get_pixel(8, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(9, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn poster_places_swatches_on_dark_background() {
        let img = story_poster(&[RED, BLUE]).unwrap();
        assert_eq!(img.dimensions(), POSTER_SIZE);
        assert_eq!(img.get_pixel(10, 10), &Rgba([18, 18, 18, 255]));
        assert_eq!(img.get_pixel(100, 180), &Rgba([255, 0, 0, 255]));
        // first band ends at 100 + 650 - 20
        assert_eq!(img.get_pixel(740, 300), &Rgba([18, 18, 18, 255]));
        assert_eq!(img.get_pixel(750, 599), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(750, 600), &Rgba([18, 18, 18, 255]));
    }

    #[test]
    fn gradient_runs_corner_to_corner() {
        let img = linear_gradient(&[RED, BLUE], 100, 20).unwrap();
        let start = img.get_pixel(0, 0);
        let end = img.get_pixel(99, 19);
        assert!(start[0] > 245 && start[2] < 10, "{start:?}");
        assert!(end[2] > 245 && end[0] < 10, "{end:?}");
    }

    #[test]
    fn single_color_gradient_is_flat() {
        let img = linear_gradient(&[GREEN], 8, 8).unwrap();
        assert!(img.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn wallpaper_fades_to_black_at_eighty_percent_opacity() {
        let img = wallpaper(&[RED], 40, 80).unwrap();
        let center = img.get_pixel(20, 40);
        assert_eq!(center[3], 204);
        assert!(center[0] > 250, "{center:?}");

        let corner = img.get_pixel(0, 0);
        assert_eq!(corner[3], 204);
        assert!(corner[0] < center[0]);
    }

    #[test]
    fn wallpaper_layers_accumulate_alpha() {
        let img = wallpaper(&[RED, BLUE], 20, 20).unwrap();
        let center = img.get_pixel(10, 10);
        // 0.8 + 0.8 * 0.2
        assert_eq!(center[3], 245);
        assert!(center[2] > center[0]);
    }

    #[test]
    fn wallpaper_composites_only_the_discs_covering_a_pixel() {
        // Radii 20 and 10: the corner sits outside the inner blue disc.
        let img = wallpaper(&[RED, BLUE], 20, 20).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgba([84, 0, 0, 204]));
        assert_eq!(img.get_pixel(19, 19), img.get_pixel(0, 0));
    }
}
