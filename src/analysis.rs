use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, oklab_distance};

/// Reference colors used for naming, in display form.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("Ocean Blue", Rgb::new(0x03, 0x71, 0x9C)),
    ("Mint", Rgb::new(0x9F, 0xFF, 0xCB)),
    ("Salmon", Rgb::new(0xFF, 0x79, 0x6C)),
    ("Midnight Blue", Rgb::new(0x01, 0x15, 0x3E)),
    ("Lavender", Rgb::new(0xC7, 0x9F, 0xEF)),
    ("Forest Green", Rgb::new(0x06, 0x47, 0x0C)),
    ("Gold", Rgb::new(0xF2, 0xC1, 0x4E)),
    ("Charcoal", Rgb::new(0x30, 0x34, 0x3F)),
    ("Blush", Rgb::new(0xF2, 0x9C, 0xA3)),
    ("Teal", Rgb::new(0x00, 0x8E, 0x9B)),
    ("Sand", Rgb::new(0xEC, 0xDC, 0xB0)),
    ("Brick", Rgb::new(0xB0, 0x41, 0x3E)),
    ("Ivory", Rgb::new(0xFF, 0xF4, 0xE0)),
    ("Sky", Rgb::new(0x7E, 0xC8, 0xE3)),
    ("Plum", Rgb::new(0x6B, 0x3A, 0x75)),
    ("Olive", Rgb::new(0x80, 0x80, 0x00)),
    ("Coral", Rgb::new(0xFF, 0x6F, 0x61)),
    ("Cobalt", Rgb::new(0x22, 0x4C, 0x98)),
];

/// Mean chroma above which a palette counts as saturated.
const VIVID_CHROMA: f32 = 0.12;

/// Overall impression of a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Energetic,
    Vivid,
    Bright,
    Deep,
    Balanced,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Energetic => "Energetic and warm",
            Mood::Vivid => "Vivid and modern",
            Mood::Bright => "Bright and clean",
            Mood::Deep => "Deep and sophisticated",
            Mood::Balanced => "Balanced and minimal",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteMeta {
    pub names: Vec<String>,
    pub mood: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryMeta {
    pub title: String,
    pub mood: String,
    pub names: Vec<String>,
}

/// Name of the closest reference color.
pub fn color_name(rgb: Rgb) -> &'static str {
    NAMED_COLORS
        .iter()
        .min_by(|(_, a), (_, b)| oklab_distance(rgb, *a).total_cmp(&oklab_distance(rgb, *b)))
        .map(|(name, _)| *name)
        .unwrap_or("Unknown")
}

pub fn color_names(palette: &[Rgb]) -> Vec<String> {
    palette.iter().map(|&c| color_name(c).to_string()).collect()
}

fn is_warm(hue: f32) -> bool {
    (0.0..=60.0).contains(&hue) || (300.0..=360.0).contains(&hue)
}

pub fn mood_for_palette(palette: &[Rgb]) -> Mood {
    if palette.is_empty() {
        return Mood::Balanced;
    }
    let lchs: Vec<_> = palette.iter().map(|c| c.to_oklch()).collect();
    let n = lchs.len() as f32;
    let l_avg = lchs.iter().map(|c| c.l).sum::<f32>() / n;
    let c_avg = lchs.iter().map(|c| c.c).sum::<f32>() / n;
    let warms = lchs.iter().filter(|c| is_warm(c.h)).count();
    let cools = lchs.len() - warms;

    if c_avg > VIVID_CHROMA && warms > cools {
        Mood::Energetic
    } else if c_avg > VIVID_CHROMA {
        Mood::Vivid
    } else if l_avg > 0.75 {
        Mood::Bright
    } else if l_avg < 0.35 {
        Mood::Deep
    } else {
        Mood::Balanced
    }
}

/// Order colors around the OKLCH hue wheel, darker first within equal hues.
pub fn smart_sort(palette: &[Rgb]) -> Vec<Rgb> {
    let mut keyed: Vec<_> = palette.iter().map(|&c| (c.to_oklch(), c)).collect();
    keyed.sort_by(|(a, _), (b, _)| a.h.total_cmp(&b.h).then(a.l.total_cmp(&b.l)));
    keyed.into_iter().map(|(_, c)| c).collect()
}

pub fn palette_meta(palette: &[Rgb]) -> PaletteMeta {
    PaletteMeta {
        names: color_names(palette),
        mood: mood_for_palette(palette).to_string(),
    }
}

pub fn story_meta(palette: &[Rgb]) -> StoryMeta {
    let names = color_names(palette);
    StoryMeta {
        title: names.first().cloned().unwrap_or_else(|| "Palette".to_string()),
        mood: mood_for_palette(palette).to_string(),
        names,
    }
}
