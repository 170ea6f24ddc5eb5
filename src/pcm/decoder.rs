//! PCM decoder: raw integer frames to normalized floats

use super::PcmConfig;

/// Decodes raw interleaved PCM frames into one normalized float per frame.
///
/// All channels are averaged with a `1 / channels` scale into a single
/// stream, then normalized so full scale maps to `[-1, 1]`. Per-channel
/// output is not available.
pub struct PcmDecoder {
    config: PcmConfig,
}

impl PcmDecoder {
    /// Create a new PCM decoder
    pub fn new(config: PcmConfig) -> Self {
        PcmDecoder { config }
    }

    /// Decode whole frames from `data`. Trailing bytes that do not fill a
    /// frame are ignored.
    pub fn decode(&self, data: &[u8]) -> Vec<f32> {
        let frame_size = self.config.bytes_per_frame();
        let width = self.config.bytes_per_sample();
        let frames = self.config.frames_from_bytes(data.len());
        let scale = 1.0 / self.config.channels as f64;
        let norm = 1.0 / (1i64 << (8 * width - 1)) as f64;

        let mut output = Vec::with_capacity(frames);
        for frame in data[..frames * frame_size].chunks_exact(frame_size) {
            let mut acc = 0.0f64;
            for sample in frame.chunks_exact(width) {
                acc += decode_sample(sample) as f64 * scale;
            }
            output.push((acc * norm) as f32);
        }
        output
    }
}

/// Sign-correct a little-endian sample of 1 to 4 bytes.
fn decode_sample(bytes: &[u8]) -> i32 {
    let mut raw = 0u32;
    for (i, b) in bytes.iter().enumerate() {
        raw |= (*b as u32) << (8 * i);
    }
    match bytes.len() {
        // unsigned with midpoint bias
        1 => raw as i32 - 0x80,
        // native signed 16-bit
        2 => raw as u16 as i16 as i32,
        // sign-extend from bit 23
        3 => ((raw as i32) << 8) >> 8,
        // already a native signed 32-bit value
        _ => raw as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width1_unsigned_bias() {
        let decoder = PcmDecoder::new(PcmConfig::new(1, 1));
        let decoded = decoder.decode(&[0x00, 0x80, 0xFF]);
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0], -1.0);
        assert_eq!(decoded[1], 0.0);
        assert!((decoded[2] - 127.0 / 128.0).abs() < 1e-7);
    }

    #[test]
    fn test_width2_signed() {
        let decoder = PcmDecoder::new(PcmConfig::new(1, 2));
        let decoded = decoder.decode(&[
            0x00, 0x80, // -32768
            0x00, 0x00, // 0
            0x00, 0x40, // 16384
            0xFF, 0x7F, // 32767
        ]);
        assert_eq!(decoded[0], -1.0);
        assert_eq!(decoded[1], 0.0);
        assert_eq!(decoded[2], 0.5);
        assert!((decoded[3] - 32767.0 / 32768.0).abs() < 1e-7);
    }

    #[test]
    fn test_width3_sign_extension() {
        let decoder = PcmDecoder::new(PcmConfig::new(1, 3));
        let decoded = decoder.decode(&[
            0x00, 0x00, 0x80, // -2^23
            0xFF, 0xFF, 0xFF, // -1
            0xFF, 0xFF, 0x7F, // 2^23 - 1
        ]);
        assert_eq!(decoded[0], -1.0);
        assert!((decoded[1] - (-1.0 / 8_388_608.0)).abs() < 1e-12);
        assert!((decoded[2] - 8_388_607.0 / 8_388_608.0).abs() < 1e-7);
    }

    #[test]
    fn test_width4_native_signed() {
        let decoder = PcmDecoder::new(PcmConfig::new(1, 4));
        let decoded = decoder.decode(&[
            0x00, 0x00, 0x00, 0x80, // i32::MIN
            0x00, 0x00, 0x00, 0x40, // 2^30
        ]);
        assert_eq!(decoded[0], -1.0);
        assert_eq!(decoded[1], 0.5);
    }

    #[test]
    fn test_stereo_downmix_averages() {
        let decoder = PcmDecoder::new(PcmConfig::new(2, 2));
        // left 16384, right -16384 -> 0.0; left 16384, right 16384 -> 0.5
        let decoded = decoder.decode(&[
            0x00, 0x40, 0x00, 0xC0, //
            0x00, 0x40, 0x00, 0x40,
        ]);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0], 0.0);
        assert_eq!(decoded[1], 0.5);
    }

    #[test]
    fn test_partial_frame_ignored() {
        let decoder = PcmDecoder::new(PcmConfig::new(1, 2));
        let decoded = decoder.decode(&[0x00, 0x40, 0x12]);
        assert_eq!(decoded, vec![0.5]);
    }
}
