use serde::{Deserialize, Serialize};

use crate::color::{Rgb, oklab_distance};

const BRANDS: &[(&str, Rgb)] = &[
    ("Coca-Cola", Rgb::new(0xF4, 0x00, 0x09)),
    ("Spotify", Rgb::new(0x1D, 0xB9, 0x54)),
    ("Twitter", Rgb::new(0x1D, 0xA1, 0xF2)),
    ("IKEA", Rgb::new(0x00, 0x58, 0xA3)),
    ("McDonald's", Rgb::new(0xFF, 0xC7, 0x2C)),
    ("Starbucks", Rgb::new(0x00, 0x75, 0x4A)),
    ("Figma", Rgb::new(0xF2, 0x4E, 0x1E)),
    ("Netflix", Rgb::new(0xE5, 0x09, 0x14)),
    ("Pepsi", Rgb::new(0x00, 0x4B, 0x93)),
    ("Twitch", Rgb::new(0x91, 0x46, 0xFF)),
];

/// Closest brand color to one palette entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrandMatch {
    pub input: Rgb,
    pub brand: String,
    pub hex: String,
}

pub fn nearest_brand(rgb: Rgb) -> BrandMatch {
    let (brand, color) = BRANDS
        .iter()
        .min_by(|(_, a), (_, b)| oklab_distance(rgb, *a).total_cmp(&oklab_distance(rgb, *b)))
        .copied()
        .unwrap_or(("N/A", Rgb::BLACK));
    BrandMatch {
        input: rgb,
        brand: brand.to_string(),
        hex: color.to_hex(),
    }
}

pub fn brand_matches(palette: &[Rgb]) -> Vec<BrandMatch> {
    palette.iter().map(|&c| nearest_brand(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_brand_colors_match_themselves() {
        for (name, rgb) in BRANDS {
            let m = nearest_brand(*rgb);
            assert_eq!(m.brand, *name);
            assert_eq!(m.hex, rgb.to_hex());
        }
    }

    #[test]
    fn matches_serialize_input_as_triple() {
        let matches = brand_matches(&[Rgb::new(0x1E, 0xB8, 0x55)]);
        assert_eq!(matches[0].brand, "Spotify");
        let json = serde_json::to_value(&matches).unwrap();
        assert_eq!(json[0]["input"], serde_json::json!([0x1E, 0xB8, 0x55]));
        assert_eq!(json[0]["hex"], "#1DB954");
    }
}
