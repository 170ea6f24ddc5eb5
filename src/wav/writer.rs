//! WAVE write session

use super::{WaveFormat, DATA_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_FORMAT_PCM, WAVE_MAGIC};
use crate::error::{Error, Result};
use crate::riff::ChunkWriter;
use std::io::{Seek, Write};
use tracing::debug;

/// WAVE write session
///
/// Format fields are settable exactly once, before any payload is written.
/// The first frame write (or an explicit close) finalizes the header: the
/// `fmt ` sub-chunk is emitted and the `data` sub-chunk opened. From then
/// on the format is immutable and payload bytes accumulate in the `data`
/// sub-chunk.
pub struct WavWriter<W: Write + Seek> {
    chunk: ChunkWriter<W>,
    channels: u16,
    sample_width: u16,
    frame_rate: u32,
    data_index: Option<usize>,
    frames_written: u64,
}

impl<W: Write + Seek> WavWriter<W> {
    /// Open `inner` as a RIFF/WAVE container. All format fields start
    /// unset.
    pub fn create(inner: W) -> Result<Self> {
        let mut chunk = ChunkWriter::create(inner, *RIFF_MAGIC)?;
        chunk.write(WAVE_MAGIC)?;
        Ok(WavWriter {
            chunk,
            channels: 0,
            sample_width: 0,
            frame_rate: 0,
            data_index: None,
            frames_written: 0,
        })
    }

    fn header_written(&self) -> bool {
        self.data_index.is_some()
    }

    /// Set the channel count. Fails once the header has been finalized.
    pub fn set_channels(&mut self, channels: u16) -> Result<()> {
        if self.header_written() {
            return Err(Error::state(
                "cannot change channels after starting to write",
            ));
        }
        if channels < 1 {
            return Err(Error::validation("channels must be at least 1"));
        }
        self.channels = channels;
        Ok(())
    }

    /// Set the sample width in bytes (1 through 4). Fails once the header
    /// has been finalized.
    pub fn set_sample_width(&mut self, sample_width: u16) -> Result<()> {
        if self.header_written() {
            return Err(Error::state(
                "cannot change sample width after starting to write",
            ));
        }
        if !(1..=4).contains(&sample_width) {
            return Err(Error::validation(
                "sample width must be between 1 and 4 bytes",
            ));
        }
        self.sample_width = sample_width;
        Ok(())
    }

    /// Set the frame rate in frames per second. Fails once the header has
    /// been finalized.
    pub fn set_frame_rate(&mut self, frame_rate: u32) -> Result<()> {
        if self.header_written() {
            return Err(Error::state(
                "cannot change frame rate after starting to write",
            ));
        }
        if frame_rate == 0 {
            return Err(Error::validation("frame rate must be positive"));
        }
        self.frame_rate = frame_rate;
        Ok(())
    }

    /// Number of whole frames appended so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn ensure_header_written(&mut self) -> Result<()> {
        if self.header_written() {
            return Ok(());
        }
        if self.channels == 0 {
            return Err(Error::validation("channels not specified"));
        }
        if self.sample_width == 0 {
            return Err(Error::validation("sample width not specified"));
        }
        if self.frame_rate == 0 {
            return Err(Error::validation("frame rate not specified"));
        }

        let format = WaveFormat {
            channels: self.channels,
            frame_rate: self.frame_rate,
            sample_width: self.sample_width,
        };
        let fmt_index = self.chunk.add_subchunk(*FMT_CHUNK)?;
        let mut payload = [0u8; 16];
        payload[0..2].copy_from_slice(&WAVE_FORMAT_PCM.to_le_bytes());
        payload[2..4].copy_from_slice(&format.channels.to_le_bytes());
        payload[4..8].copy_from_slice(&format.frame_rate.to_le_bytes());
        payload[8..12].copy_from_slice(&format.byte_rate().to_le_bytes());
        payload[12..14].copy_from_slice(&format.block_align().to_le_bytes());
        payload[14..16].copy_from_slice(&format.bits_per_sample().to_le_bytes());
        self.chunk.write_subchunk(fmt_index, &payload)?;
        self.data_index = Some(self.chunk.add_subchunk(*DATA_CHUNK)?);
        debug!(
            channels = format.channels,
            frame_rate = format.frame_rate,
            sample_width = format.sample_width,
            "finalized WAVE header"
        );
        Ok(())
    }

    /// Append raw interleaved PCM frames. `frames` must hold whole frames,
    /// a multiple of channels x sample width bytes. The first call
    /// finalizes the header; it fails with [`Error::Validation`] if any
    /// format field is still unset.
    pub fn write_frames(&mut self, frames: &[u8]) -> Result<()> {
        self.ensure_header_written()?;
        let Some(data_index) = self.data_index else {
            return Err(Error::state("data chunk is not open"));
        };
        self.chunk.write_subchunk(data_index, frames)?;
        let frame_size = self.channels as usize * self.sample_width as usize;
        self.frames_written += (frames.len() / frame_size) as u64;
        Ok(())
    }

    /// Finalize the header if no frames were ever written (an empty file is
    /// still header-valid), then flush and release the resource. Safe to
    /// call more than once.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_header_written()?;
        self.chunk.close()
    }
}
