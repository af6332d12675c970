//! Role-based UI themes derived from a palette.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Result;

const SURFACE: Rgb = Rgb::new(18, 18, 18);
const TEXT: Rgb = Rgb::new(235, 235, 235);
const FALLBACK_PRIMARY: Rgb = Rgb::new(124, 92, 255);
const FALLBACK_SECONDARY: Rgb = Rgb::new(60, 60, 60);
const DANGER: Rgb = Rgb::new(215, 75, 100);

/// Minimum OKLCH lightness gap between body text and the surface.
const TEXT_CONTRAST: f32 = 0.4;
/// Minimum gap between a filled role and the text drawn on it.
const ON_COLOR_CONTRAST: f32 = 0.45;

/// Named role to hex color mapping, in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub variables: IndexMap<String, String>,
}

impl Theme {
    pub fn get(&self, role: &str) -> Option<&str> {
        self.variables.get(role).map(String::as_str)
    }

    /// Render as a `:root` block of CSS custom properties.
    pub fn to_css(&self) -> String {
        let vars = self
            .variables
            .iter()
            .map(|(role, hex)| format!("--{role}: {hex};"))
            .collect::<Vec<_>>()
            .join("\n  ");
        format!(":root{{\n  {vars}\n}}\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Return `fg`, or `fg` moved in lightness until it is at least `target` away from `bg`.
pub fn ensure_contrast(fg: Rgb, bg: Rgb, target: f32) -> Rgb {
    let f = fg.to_oklch();
    let b = bg.to_oklch();
    if (f.l - b.l).abs() >= target {
        return fg;
    }
    let l = if b.l >= 0.5 { (b.l - target).max(0.0) } else { (b.l + target).min(1.0) };
    Rgb::from_oklch(l, f.c, f.h)
}

pub fn build_theme(palette: &[Rgb]) -> Theme {
    let primary = palette.first().copied().unwrap_or(FALLBACK_PRIMARY);
    let secondary = palette.get(1).copied().unwrap_or(FALLBACK_SECONDARY);

    let roles = [
        ("surface", SURFACE),
        ("text", ensure_contrast(TEXT, SURFACE, TEXT_CONTRAST)),
        ("primary", primary),
        ("on-primary", ensure_contrast(Rgb::WHITE, primary, ON_COLOR_CONTRAST)),
        ("secondary", secondary),
        ("on-secondary", ensure_contrast(Rgb::WHITE, secondary, ON_COLOR_CONTRAST)),
        ("danger", DANGER),
        ("on-danger", Rgb::WHITE),
    ];

    Theme {
        variables: roles.into_iter().map(|(role, c)| (role.to_string(), c.to_hex())).collect(),
    }
}
