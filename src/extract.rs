//! Dominant-color extraction.
//!
//! Pixels are sampled on a fixed stride, translucent ones are dropped, and
//! the remainder is clustered with k-means in CIE Lab. Several seeded runs
//! are made and the one with the lowest score wins, so the same image always
//! produces the same palette.

use std::collections::HashSet;

use image::{GenericImageView, imageops::FilterType};
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, Srgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Palette, Rgb};
use crate::error::{PaletteError, Result};

/// Cluster membership is stored as `u8`, so k-means cannot track more clusters.
pub const MAX_COLORS: usize = 256;

/// Tuning knobs for [`extract_palette`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Number of clusters.
    pub k: usize,
    /// Upper bound on k-means iterations per run.
    pub max_iter: usize,
    /// Convergence threshold passed to k-means.
    pub converge: f32,
    /// Number of seeded runs; the best scoring one is kept.
    pub runs: u64,
    /// Seed of the first run.
    pub seed: u64,
    /// Only every `sample_step`-th pixel is considered.
    pub sample_step: usize,
    /// Pixels with alpha below this are ignored.
    pub alpha_threshold: u8,
    /// Longest side an image is fitted to before sampling.
    pub max_side: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            k: 5,
            max_iter: 20,
            converge: 1e-4,
            runs: 3,
            seed: 0,
            sample_step: 8,
            alpha_threshold: 16,
            max_side: 720,
        }
    }
}

/// Extract a palette from a raw RGBA buffer of `width * height` pixels.
///
/// Colors are ordered by how many sampled pixels they represent. An image
/// without a single usable pixel yields `[[0, 0, 0]]`.
pub fn extract_palette(width: u32, height: u32, rgba: &[u8], opts: &ExtractOptions) -> Result<Palette> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(PaletteError::InvalidPixelBuffer { width, height, len: rgba.len() });
    }

    let step = opts.sample_step.max(1);
    let samples: Vec<[u8; 3]> = rgba
        .chunks_exact(4)
        .step_by(step)
        .filter(|px| px[3] >= opts.alpha_threshold)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    // k-means++ seeding needs at least k distinct points.
    let distinct = samples.iter().collect::<HashSet<_>>().len();
    let lab_pixels: Vec<Lab> = samples
        .iter()
        .map(|&[r, g, b]| Srgb::<u8>::new(r, g, b).into_linear().into_color())
        .collect();

    if lab_pixels.is_empty() || opts.k == 0 {
        debug!(width, height, "no opaque pixels sampled, returning black");
        return Ok(vec![Rgb::BLACK]);
    }

    let k = opts.k.min(distinct).min(MAX_COLORS);
    let best = (0..opts.runs.max(1))
        .map(|run| get_kmeans(k, opts.max_iter, opts.converge, false, &lab_pixels, opts.seed.wrapping_add(run)))
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or(PaletteError::EmptyPalette)?;

    let mut counts = vec![0usize; best.centroids.len()];
    for &idx in &best.indices {
        counts[idx as usize] += 1;
    }

    let mut ranked: Vec<usize> = (0..best.centroids.len()).filter(|&i| counts[i] > 0).collect();
    ranked.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    let palette: Palette = ranked
        .into_iter()
        .map(|i| {
            let rgb_f32: Srgb<f32> = Srgb::from_linear(best.centroids[i].into_color());
            Rgb::from(rgb_f32.into_format::<u8>())
        })
        .collect();

    debug!(
        samples = lab_pixels.len(),
        k,
        score = best.score,
        colors = palette.len(),
        "extracted palette"
    );
    Ok(palette)
}

/// Decode an encoded image (PNG, JPEG, ...) and extract its palette.
pub fn extract_from_image(input: &[u8], opts: &ExtractOptions) -> Result<Palette> {
    let img = image::load_from_memory(input)?;
    let (orig_w, orig_h) = img.dimensions();
    let (w, h) = fit_size(orig_w, orig_h, opts.max_side);

    let rgba = if (w, h) == (orig_w, orig_h) {
        img.to_rgba8()
    } else {
        image::imageops::resize(&img, w, h, FilterType::Triangle)
    };
    debug!(orig_w, orig_h, w, h, "fitted image for extraction");

    extract_palette(w, h, rgba.as_raw(), opts)
}

/// Shrink `(w, h)` so the longest side is at most `max`, keeping the aspect ratio.
pub fn fit_size(w: u32, h: u32, max: u32) -> (u32, u32) {
    if w.max(h) <= max || max == 0 {
        return (w, h);
    }
    let scale = |side: u32, long: u32| ((side as f64 * max as f64 / long as f64).round() as u32).max(1);
    if w >= h {
        (max, scale(h, w))
    } else {
        (scale(w, h), max)
    }
}
