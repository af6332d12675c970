use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::Result;

/// Lowest pitch, mapped to hue 0.
const BASE_FREQUENCY: f32 = 220.0;
/// Pitch range covered by a full turn of the hue wheel.
const FREQUENCY_SPAN: f32 = 660.0;
const GAIN: f32 = 0.15;
pub const DEFAULT_DURATION: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
}

/// A short fixed-waveform tone whose pitch follows a color's hue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency: f32,
    pub duration: f32,
    pub gain: f32,
    pub waveform: Waveform,
}

impl Tone {
    pub fn from_color(rgb: Rgb, duration: f32) -> Self {
        let hue = rgb.hsl_hue() as f32;
        Tone {
            frequency: BASE_FREQUENCY + hue / 360.0 * FREQUENCY_SPAN,
            duration: duration.max(0.0),
            gain: GAIN,
            waveform: Waveform::Sine,
        }
    }

    pub fn from_hex(hex: &str, duration: f32) -> Result<Self> {
        Ok(Self::from_color(Rgb::from_hex(hex)?, duration))
    }

    /// Mono PCM samples in `[-gain, gain]`.
    pub fn samples(&self, sample_rate: u32) -> Vec<f32> {
        let count = (self.duration * sample_rate as f32).round() as usize;
        let step = self.frequency / sample_rate as f32;
        (0..count)
            .map(|i| match self.waveform {
                Waveform::Sine => self.gain * (TAU * step * i as f32).sin(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(hex: &str) -> f32 {
        Tone::from_hex(hex, DEFAULT_DURATION).unwrap().frequency
    }

    #[test]
    fn hue_maps_onto_pitch_range() {
        for (hex, hz) in [("#FF0000", 220.0), ("#00FFFF", 550.0), ("#0000FF", 660.0), ("#808080", 220.0)] {
            assert!((pitch(hex) - hz).abs() < 1e-3, "{hex}: {}", pitch(hex));
        }
    }

    #[test]
    fn samples_cover_duration_within_gain() {
        let tone = Tone::from_color(Rgb::new(0, 255, 0), 0.25);
        let samples = tone.samples(8000);
        assert_eq!(samples.len(), 2000);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= GAIN + f32::EPSILON));
        assert!(samples.iter().any(|s| *s > GAIN * 0.9));
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(Tone::from_hex("#12", DEFAULT_DURATION).is_err());
    }
}
