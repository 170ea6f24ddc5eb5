//! WAVE read session

use super::{
    WaveFormat, COMP_NAME_NONE, COMP_TYPE_NONE, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC,
    WAVE_FORMAT_PCM, WAVE_MAGIC,
};
use crate::error::{Error, Result};
use crate::riff::ChunkReader;
use bytes::Bytes;
use std::io::{Read, Seek};
use tracing::debug;

/// WAVE read session
///
/// Construction parses the whole RIFF container: every sub-chunk header is
/// read up front, the `fmt ` sub-chunk is decoded, and a reference to the
/// `data` sub-chunk is retained without touching its payload. Frames are
/// then read sequentially on demand.
///
/// Exactly one `fmt ` sub-chunk must precede the `data` sub-chunk; the
/// first `data` sub-chunk wins and ends the scan.
#[derive(Debug)]
pub struct WavReader<R: Read + Seek> {
    chunk: ChunkReader<R>,
    format: WaveFormat,
    data_index: usize,
    frames: u64,
}

impl<R: Read + Seek> WavReader<R> {
    /// Parse a RIFF/WAVE container from `inner`.
    pub fn open(inner: R) -> Result<Self> {
        let mut chunk = ChunkReader::open(inner)?;
        if chunk.id() != *RIFF_MAGIC {
            return Err(Error::format("file does not start with a RIFF chunk"));
        }
        let mut marker = [0u8; 4];
        chunk.read(&mut marker)?;
        if marker != *WAVE_MAGIC {
            return Err(Error::format("RIFF chunk is not a WAVE file"));
        }
        chunk.parse_subchunks()?;

        let mut format: Option<WaveFormat> = None;
        let mut data: Option<(usize, u64)> = None;
        for index in 0..chunk.subchunks().len() {
            let sub = chunk.subchunks()[index];
            if sub.id == *FMT_CHUNK {
                format = Some(Self::parse_fmt(&mut chunk, index, sub.size)?);
            } else if sub.id == *DATA_CHUNK {
                let format = format
                    .as_ref()
                    .ok_or_else(|| Error::chunk_order("data chunk appears before fmt chunk"))?;
                // trailing bytes that do not fill a whole frame are dropped
                data = Some((index, sub.size as u64 / format.frame_size() as u64));
                break;
            }
        }

        let format = format.ok_or_else(|| Error::missing_chunk("fmt "))?;
        let (data_index, frames) = data.ok_or_else(|| Error::missing_chunk("data"))?;
        debug!(
            channels = format.channels,
            frame_rate = format.frame_rate,
            sample_width = format.sample_width,
            frames,
            "parsed WAVE container"
        );
        Ok(WavReader {
            chunk,
            format,
            data_index,
            frames,
        })
    }

    fn parse_fmt(chunk: &mut ChunkReader<R>, index: usize, size: u32) -> Result<WaveFormat> {
        if size < 14 {
            return Err(Error::format("fmt chunk too small"));
        }
        let mut fixed = [0u8; 14];
        chunk.read_subchunk(index, &mut fixed)?;
        let format_tag = u16::from_le_bytes([fixed[0], fixed[1]]);
        let channels = u16::from_le_bytes([fixed[2], fixed[3]]);
        let frame_rate = u32::from_le_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        // average byte rate (bytes 8..12) and block alignment (bytes 12..14)
        // are redundant declarations; both are recomputed from the primary
        // fields when needed

        if format_tag != WAVE_FORMAT_PCM {
            return Err(Error::unsupported(format!(
                "WAVE format tag {:#06x} is not linear PCM",
                format_tag
            )));
        }

        let mut raw_bits = [0u8; 2];
        chunk.read_subchunk(index, &mut raw_bits)?;
        let bits_per_sample = u16::from_le_bytes(raw_bits);
        let sample_width = ((bits_per_sample as u32 + 7) / 8) as u16;
        if sample_width == 0 || channels == 0 {
            return Err(Error::format("fmt chunk declares a zero-byte frame"));
        }
        if sample_width > 4 {
            return Err(Error::unsupported(format!(
                "{} bits per sample exceeds 32",
                bits_per_sample
            )));
        }

        Ok(WaveFormat {
            channels,
            frame_rate,
            sample_width,
        })
    }

    /// Parsed format descriptor
    pub fn format(&self) -> &WaveFormat {
        &self.format
    }

    /// Total number of whole frames in the data sub-chunk
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Compression type marker; always uncompressed PCM
    pub fn comp_type(&self) -> &'static str {
        COMP_TYPE_NONE
    }

    /// Human-readable compression name
    pub fn comp_name(&self) -> &'static str {
        COMP_NAME_NONE
    }

    /// Stream duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frames as f64 / self.format.frame_rate as f64
    }

    /// Read `count` frames of raw interleaved PCM from the data sub-chunk,
    /// advancing the session's read cursor.
    ///
    /// Reading past the recorded frame count is the caller's responsibility
    /// to avoid; the chunk accessor rejects reads beyond the declared
    /// payload with [`Error::EndOfStream`].
    pub fn read_frames(&mut self, count: u64) -> Result<Bytes> {
        let mut buf = vec![0u8; count as usize * self.format.frame_size()];
        self.chunk.read_subchunk(self.data_index, &mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Release the underlying resource. Safe to call more than once;
    /// dropping the session releases it as well.
    pub fn close(&mut self) -> Result<()> {
        self.chunk.close()
    }
}
