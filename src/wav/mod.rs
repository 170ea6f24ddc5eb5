//! WAVE audio format support
//!
//! This module implements the RIFF/WAVE format layer: locating and
//! validating the `fmt ` and `data` sub-chunks, deriving the per-frame byte
//! layout, and frame-granular reading and writing of raw interleaved PCM.
//! Only uncompressed linear PCM is supported; every other format tag is
//! rejected.

pub mod reader;
pub mod writer;

pub use reader::WavReader;
pub use writer::WavWriter;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Format tag for uncompressed linear PCM
pub const WAVE_FORMAT_PCM: u16 = 0x0001;

/// Compression type marker reported for linear PCM streams
pub const COMP_TYPE_NONE: &str = "NONE";
/// Human-readable compression name for linear PCM streams
pub const COMP_NAME_NONE: &str = "not compressed";

/// Declared sample layout of a WAVE stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFormat {
    /// Number of interleaved channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Frames per second
    pub frame_rate: u32,
    /// Bytes per sample, 1 through 4
    pub sample_width: u16,
}

impl WaveFormat {
    /// Bytes per frame across all channels
    pub fn frame_size(&self) -> usize {
        self.channels as usize * self.sample_width as usize
    }

    /// Block alignment field as stored in the fmt chunk
    pub fn block_align(&self) -> u16 {
        self.channels * self.sample_width
    }

    /// Average bytes per second field as stored in the fmt chunk
    pub fn byte_rate(&self) -> u32 {
        self.frame_rate * self.block_align() as u32
    }

    /// Bits per sample field as stored in the fmt chunk
    pub fn bits_per_sample(&self) -> u16 {
        self.sample_width * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_format_derived_fields() {
        let format = WaveFormat {
            channels: 2,
            frame_rate: 44100,
            sample_width: 2,
        };
        assert_eq!(format.frame_size(), 4);
        assert_eq!(format.block_align(), 4);
        assert_eq!(format.byte_rate(), 176400);
        assert_eq!(format.bits_per_sample(), 16);
    }
}
