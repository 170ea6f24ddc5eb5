//! PCM encoder: normalized floats to raw integer frames

use super::PcmConfig;

/// Quantizes normalized floats into raw interleaved PCM frames.
///
/// Each input value produces one frame, replicated identically across every
/// channel; there is no true multi-channel encode path. This mirrors the
/// decoder's fixed downmix.
pub struct PcmEncoder {
    config: PcmConfig,
}

impl PcmEncoder {
    /// Create a new PCM encoder
    pub fn new(config: PcmConfig) -> Self {
        PcmEncoder { config }
    }

    /// Encode `samples` into whole frames. The frame count is
    /// `samples.len() / channels`, truncating; input beyond the last whole
    /// frame is silently dropped.
    pub fn encode(&self, samples: &[f32]) -> Vec<u8> {
        let width = self.config.bytes_per_sample();
        let frames = self.config.frames_from_samples(samples.len());
        let mut output = Vec::with_capacity(frames * self.config.bytes_per_frame());
        for &value in &samples[..frames] {
            let raw = (self.quantize(value) as u32).to_le_bytes();
            for _ in 0..self.config.channels {
                output.extend_from_slice(&raw[..width]);
            }
        }
        output
    }

    /// Clip to `[-1, 1]` and scale to the full integer range for the
    /// configured width, rounding to nearest with ties biased toward
    /// positive.
    fn quantize(&self, value: f32) -> i32 {
        let clipped = value.clamp(-1.0, 1.0) as f64;
        let full = 1i64 << (8 * self.config.sample_width as u32);
        let scaled = ((clipped * full as f64) as i64 + 1) >> 1;
        // +1.0 lands exactly one past the largest representable sample and
        // must not wrap
        let clamped = scaled.clamp(-(full >> 1), (full >> 1) - 1);
        let biased = if self.config.sample_width == 1 {
            clamped + 0x80
        } else {
            clamped
        };
        biased as i32
    }
}
