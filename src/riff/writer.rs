//! Sequential writer for chunked resources

use super::ChunkHeader;
use crate::error::{Error, Result};
use std::io::{Seek, SeekFrom, Write};

/// The sub-chunk currently accepting payload writes.
#[derive(Debug, Clone, Copy)]
struct OpenChunk {
    index: usize,
    size_pos: u64,
    payload_start: u64,
}

/// Write-side chunk accessor
///
/// Creates a container chunk and appends sub-chunks to it sequentially.
/// Declared sizes are written as placeholders and patched when a sub-chunk
/// is finalized, either by the next [`add_subchunk`] or by [`close`].
/// Only the most recently added sub-chunk accepts writes.
///
/// [`add_subchunk`]: ChunkWriter::add_subchunk
/// [`close`]: ChunkWriter::close
pub struct ChunkWriter<W: Write + Seek> {
    inner: Option<W>,
    chunk_start: u64,
    children: Vec<[u8; 4]>,
    open: Option<OpenChunk>,
}

impl<W: Write + Seek> ChunkWriter<W> {
    /// Create a new container chunk, writing its header with a placeholder
    /// size.
    pub fn create(mut inner: W, id: [u8; 4]) -> Result<Self> {
        let chunk_start = inner.stream_position()?;
        inner.write_all(&ChunkHeader { id, size: 0 }.to_bytes())?;
        Ok(ChunkWriter {
            inner: Some(inner),
            chunk_start,
            children: Vec::new(),
            open: None,
        })
    }

    /// Raw append into the container payload. Only legal before the first
    /// sub-chunk is created.
    pub fn write(&mut self, src: &[u8]) -> Result<()> {
        if !self.children.is_empty() {
            return Err(Error::state("raw container writes must precede sub-chunks"));
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk writer is closed"))?;
        inner.write_all(src)?;
        Ok(())
    }

    /// Patch the declared size of the open sub-chunk and pad odd payloads
    /// to the word boundary.
    fn finalize_open(&mut self) -> Result<()> {
        let Some(open) = self.open.take() else {
            return Ok(());
        };
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk writer is closed"))?;
        let end = inner.stream_position()?;
        let size = (end - open.payload_start) as u32;
        inner.seek(SeekFrom::Start(open.size_pos))?;
        inner.write_all(&size.to_le_bytes())?;
        inner.seek(SeekFrom::Start(end))?;
        if size % 2 != 0 {
            inner.write_all(&[0u8])?;
        }
        Ok(())
    }

    /// Create a new writable sub-chunk and return its index in the
    /// container's sub-chunk collection. Any previously open sub-chunk is
    /// finalized first.
    pub fn add_subchunk(&mut self, id: [u8; 4]) -> Result<usize> {
        self.finalize_open()?;
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk writer is closed"))?;
        let header_pos = inner.stream_position()?;
        inner.write_all(&ChunkHeader { id, size: 0 }.to_bytes())?;
        let index = self.children.len();
        self.children.push(id);
        self.open = Some(OpenChunk {
            index,
            size_pos: header_pos + 4,
            payload_start: header_pos + 8,
        });
        Ok(index)
    }

    /// Sequential append to sub-chunk `index`, which must be the most
    /// recently added one.
    pub fn write_subchunk(&mut self, index: usize, src: &[u8]) -> Result<()> {
        match self.open {
            Some(ref open) if open.index == index => {}
            _ => {
                return Err(Error::state(format!(
                    "sub-chunk {index} is not open for writing"
                )))
            }
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk writer is closed"))?;
        inner.write_all(src)?;
        Ok(())
    }

    /// Finalize all declared sizes, flush, and release the resource. Safe
    /// to call more than once.
    pub fn close(&mut self) -> Result<()> {
        if self.inner.is_none() {
            return Ok(());
        }
        self.finalize_open()?;
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk writer is closed"))?;
        let end = inner.stream_position()?;
        let size = (end - (self.chunk_start + 8)) as u32;
        inner.seek(SeekFrom::Start(self.chunk_start + 4))?;
        inner.write_all(&size.to_le_bytes())?;
        inner.flush()?;
        self.inner.take();
        Ok(())
    }
}
