//! Linear PCM sample conversion
//!
//! This module converts between raw interleaved integer PCM frames and flat
//! sequences of normalized `[-1, 1]` floats. The read path averages all
//! channels into a single mono stream; the write path replicates each value
//! identically across every channel. That downmix/duplicate asymmetry is a
//! fixed, non-configurable policy; callers needing true per-channel
//! fidelity are out of scope.

pub mod decoder;
pub mod encoder;

pub use decoder::PcmDecoder;
pub use encoder::PcmEncoder;

use crate::wav::WaveFormat;

/// PCM conversion configuration
#[derive(Debug, Clone, Copy)]
pub struct PcmConfig {
    /// Number of interleaved channels
    pub channels: u16,
    /// Bytes per sample, 1 through 4
    pub sample_width: u16,
}

impl PcmConfig {
    /// Create a new PCM configuration
    pub fn new(channels: u16, sample_width: u16) -> Self {
        PcmConfig {
            channels,
            sample_width,
        }
    }

    /// Configuration matching a parsed WAVE format descriptor
    pub fn from_format(format: &WaveFormat) -> Self {
        PcmConfig {
            channels: format.channels,
            sample_width: format.sample_width,
        }
    }

    /// Bytes per sample for a single channel
    pub fn bytes_per_sample(&self) -> usize {
        self.sample_width as usize
    }

    /// Bytes per frame across all channels
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Whole frames contained in `bytes` bytes; trailing partial-frame
    /// bytes are discarded.
    pub fn frames_from_bytes(&self, bytes: usize) -> usize {
        bytes / self.bytes_per_frame()
    }

    /// Whole frames encodable from `samples` input values; the remainder of
    /// a sequence not evenly divisible by the channel count is discarded.
    pub fn frames_from_samples(&self, samples: usize) -> usize {
        samples / self.channels as usize
    }
}
