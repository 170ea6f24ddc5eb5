//! wavio - WAVE (RIFF/PCM) audio file reading and writing
//!
//! wavio decodes and encodes uncompressed linear PCM WAVE files, converting
//! between the on-disk integer sample representation and an in-memory
//! normalized floating-point signal.
//!
//! # Architecture
//!
//! - `riff`: chunk-level container access (headers, sub-chunk enumeration,
//!   raw payload I/O)
//! - `wav`: WAVE format layer (`fmt `/`data` sub-chunks, frame-granular
//!   read/write sessions)
//! - `pcm`: sample conversion between integer frames and normalized floats
//! - `error`: typed error taxonomy
//!
//! The read path averages all channels into a single float stream; the
//! write path replicates one float stream across every channel. See the
//! `pcm` module docs for this policy.
//!
//! All I/O is synchronous and blocking. Sessions own their underlying
//! resource exclusively and are not meant for concurrent use.

pub mod error;
pub mod pcm;
pub mod riff;
pub mod wav;

pub use error::{Error, Result};
pub use pcm::{PcmConfig, PcmDecoder, PcmEncoder};
pub use wav::{WavReader, WavWriter, WaveFormat};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// wavio version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the wavio library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize library logging with the given configuration
pub fn init(config: Config) {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        let _ = tracing_subscriber::fmt().with_env_filter(level).try_init();
    }
}

/// Read a WAVE file into a flat sequence of normalized floats plus the
/// frame rate. All channels are averaged into a single mono stream.
///
/// A file that cannot be opened yields [`Error::Open`] and no partial
/// output. A malformed or unsupported container is fatal to the session
/// and yields the corresponding parse error.
pub fn read_wave_file<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| Error::open(format!("{}: {}", path.display(), e)))?;
    let mut reader = WavReader::open(BufReader::new(file))?;
    let frame_rate = reader.format().frame_rate;
    let frames = reader.frames();
    let decoder = PcmDecoder::new(PcmConfig::from_format(reader.format()));
    let data = reader.read_frames(frames)?;
    let samples = decoder.decode(&data);
    reader.close()?;
    Ok((samples, frame_rate))
}

/// Write a flat sequence of normalized floats as a WAVE file. Each value
/// is quantized to `sample_width` bytes and replicated across `channels`
/// channels; the frame count is `samples.len() / channels`, truncating.
///
/// A file that cannot be created yields [`Error::Open`]; invalid format
/// parameters yield [`Error::Validation`].
pub fn write_wave_file<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    frame_rate: u32,
    sample_width: u16,
    channels: u16,
) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).map_err(|e| Error::open(format!("{}: {}", path.display(), e)))?;
    let mut writer = WavWriter::create(BufWriter::new(file))?;
    writer.set_channels(channels)?;
    writer.set_sample_width(sample_width)?;
    writer.set_frame_rate(frame_rate)?;
    let encoder = PcmEncoder::new(PcmConfig::new(channels, sample_width));
    writer.write_frames(&encoder.encode(samples))?;
    writer.close()
}
