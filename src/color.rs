//! Color triples and the perceptual conversions every other module builds on.

use std::fmt;
use std::str::FromStr;

use palette::{Clamp, FromColor, Hsv, Oklab, Oklch, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// An 8-bit sRGB color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

/// Ordered list of colors, most significant first.
pub type Palette = Vec<Rgb>;

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    pub const fn r(self) -> u8 {
        self.0[0]
    }

    pub const fn g(self) -> u8 {
        self.0[1]
    }

    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidHex(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PaletteError::InvalidHex(s.to_string()))
        };
        Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }

    pub fn to_srgb(self) -> Srgb<u8> {
        Srgb::new(self.r(), self.g(), self.b())
    }

    pub fn to_oklab(self) -> Oklab {
        Oklab::from_color(self.to_srgb().into_format::<f32>())
    }

    pub fn to_oklch(self) -> Lch {
        let lch = Oklch::from_color(self.to_oklab());
        Lch {
            l: lch.l,
            c: lch.chroma,
            h: lch.hue.into_positive_degrees(),
        }
    }

    /// Convert back from OKLCH, clamping out-of-gamut results into sRGB.
    pub fn from_oklch(l: f32, c: f32, h: f32) -> Self {
        let srgb: Srgb = Srgb::from_color(Oklch::new(l, c, h)).clamp();
        srgb.into_format::<u8>().into()
    }

    /// HSL/HSV hue in whole degrees, 0 for grays.
    pub fn hsl_hue(self) -> u16 {
        let [r, g, b] = self.0;
        if r == g && g == b {
            return 0;
        }
        let hsv = Hsv::from_color(self.to_srgb().into_format::<f32>());
        (hsv.hue.into_positive_degrees().round() as u16) % 360
    }
}

/// OKLCH coordinates with hue in degrees `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Rgb([c.red, c.green, c.blue])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

/// Squared Euclidean distance between two colors in OKLab.
pub fn oklab_distance(a: Rgb, b: Rgb) -> f32 {
    let (x, y) = (a.to_oklab(), b.to_oklab());
    let dl = x.l - y.l;
    let da = x.a - y.a;
    let db = x.b - y.b;
    dl * dl + da * da + db * db
}

/// Parse a comma-separated list of hex codes.
pub fn parse_hex_list(s: &str) -> Result<Palette> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Rgb::from_hex)
        .collect()
}

/// One `#RRGGBB` per line.
pub fn hex_list(palette: &[Rgb]) -> String {
    palette.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#1DB954").unwrap(), Rgb::new(0x1D, 0xB9, 0x54));
        assert_eq!(Rgb::from_hex("ff6f61").unwrap(), Rgb::new(255, 111, 97));
        assert_eq!(Rgb::new(255, 111, 97).to_hex(), "#FF6F61");
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#FFF", "#GG0000", "1234567", "#12345é", "#+1+1+1", "-1-1-1"] {
            assert!(matches!(Rgb::from_hex(bad), Err(PaletteError::InvalidHex(_))), "{bad}");
        }
    }

    #[test]
    fn oklch_round_trip_is_close() {
        let c = Rgb::new(3, 113, 156);
        let ok = c.to_oklch();
        let back = Rgb::from_oklch(ok.l, ok.c, ok.h);
        for (x, y) in c.0.iter().zip(back.0.iter()) {
            assert!((*x as i16 - *y as i16).abs() <= 1, "{c} vs {back}");
        }
    }

    #[test]
    fn white_and_black_lightness() {
        assert!((Rgb::WHITE.to_oklch().l - 1.0).abs() < 1e-3);
        assert!(Rgb::BLACK.to_oklch().l.abs() < 1e-3);
    }

    #[test]
    fn hsl_hue_matches_primaries() {
        assert_eq!(Rgb::new(255, 0, 0).hsl_hue(), 0);
        assert_eq!(Rgb::new(0, 255, 0).hsl_hue(), 120);
        assert_eq!(Rgb::new(0, 0, 255).hsl_hue(), 240);
        assert_eq!(Rgb::new(255, 0, 255).hsl_hue(), 300);
        assert_eq!(Rgb::new(128, 128, 128).hsl_hue(), 0);
    }

    #[test]
    fn distance_is_zero_for_identical_colors() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(oklab_distance(c, c), 0.0);
        assert!(oklab_distance(Rgb::BLACK, Rgb::WHITE) > 0.9);
    }

    #[test]
    fn parses_comma_separated_lists() {
        let p = parse_hex_list("#000000, ffffff,").unwrap();
        assert_eq!(p, vec![Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(hex_list(&p), "#000000\n#FFFFFF");
    }
}
