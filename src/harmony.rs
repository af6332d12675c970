use crate::color::{Palette, Rgb};
use crate::error::Result;

/// Hue offsets in degrees: base, complement, two analogues, split complement.
const HARMONY_OFFSETS: [f32; 5] = [0.0, 180.0, 30.0, -30.0, 210.0];

/// Chroma floor so grays still produce distinguishable hues.
const MIN_CHROMA: f32 = 0.04;

/// Build up to five harmonious colors around `seed`, keeping its lightness.
pub fn harmony(seed: Rgb, n: usize) -> Palette {
    let lch = seed.to_oklch();
    let chroma = lch.c.max(MIN_CHROMA);
    HARMONY_OFFSETS
        .iter()
        .take(n)
        .map(|offset| Rgb::from_oklch(lch.l, chroma, (lch.h + offset).rem_euclid(360.0)))
        .collect()
}

pub fn harmony_from_hex(seed: &str, n: usize) -> Result<Palette> {
    Ok(harmony(Rgb::from_hex(seed)?, n))
}

/// Interpolate `steps` colors from `a` to `b` in OKLCH, along the shorter hue arc.
pub fn mix(a: Rgb, b: Rgb, steps: usize) -> Palette {
    let (x, y) = (a.to_oklch(), b.to_oklch());
    let dh = (y.h - x.h + 540.0).rem_euclid(360.0) - 180.0;
    (0..steps)
        .map(|i| {
            let t = if steps > 1 { i as f32 / (steps - 1) as f32 } else { 0.0 };
            let l = (1.0 - t) * x.l + t * y.l;
            let c = (1.0 - t) * x.c + t * y.c;
            let h = (x.h + t * dh).rem_euclid(360.0);
            Rgb::from_oklch(l, c, h)
        })
        .collect()
}

pub fn mix_hex(a: &str, b: &str, steps: usize) -> Result<Palette> {
    Ok(mix(Rgb::from_hex(a)?, Rgb::from_hex(b)?, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        a.0.iter().zip(b.0.iter()).all(|(x, y)| (*x as i16 - *y as i16).abs() <= 2)
    }

    #[test]
    fn harmony_starts_with_the_seed() {
        let seed = Rgb::new(0x1D, 0xA1, 0xF2);
        let cols = harmony(seed, 5);
        assert_eq!(cols.len(), 5);
        assert!(close(cols[0], seed), "{} vs {seed}", cols[0]);
    }

    #[test]
    fn harmony_caps_at_five_colors() {
        assert_eq!(harmony_from_hex("#7C5CFF", 9).unwrap().len(), 5);
        assert_eq!(harmony_from_hex("#7C5CFF", 2).unwrap().len(), 2);
        assert!(harmony_from_hex("nope", 3).is_err());
    }

    #[test]
    fn complement_sits_across_the_wheel() {
        let seed = Rgb::new(90, 110, 150);
        let cols = harmony(seed, 2);
        let dh = (cols[1].to_oklch().h - seed.to_oklch().h).rem_euclid(360.0);
        assert!((dh - 180.0).abs() < 10.0, "hue delta {dh}");
    }

    #[test]
    fn mix_hits_both_endpoints() {
        let a = Rgb::new(255, 0, 0);
        let b = Rgb::new(0, 0, 255);
        let cols = mix(a, b, 5);
        assert_eq!(cols.len(), 5);
        assert!(close(cols[0], a));
        assert!(close(cols[4], b));
    }

    #[test]
    fn mix_degenerate_step_counts() {
        assert!(mix(Rgb::BLACK, Rgb::WHITE, 0).is_empty());
        let one = mix_hex("#FF0000", "#0000FF", 1).unwrap();
        assert_eq!(one.len(), 1);
        assert!(close(one[0], Rgb::new(255, 0, 0)));
    }
}
