//! Sequential reader for chunked resources

use super::ChunkHeader;
use crate::error::{Error, Result};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Record for one sub-chunk found inside a container payload.
///
/// The reader owns the ordered collection of these records; callers hold an
/// index into it, never a second owner.
#[derive(Debug, Clone, Copy)]
pub struct Subchunk {
    /// 4-byte chunk identifier
    pub id: [u8; 4],
    /// Declared payload length in bytes
    pub size: u32,
    /// Absolute offset of the payload start
    offset: u64,
    /// Bytes already consumed by sequential reads
    cursor: u32,
}

impl Subchunk {
    /// Bytes left before the declared payload is exhausted
    pub fn remaining(&self) -> u32 {
        self.size - self.cursor
    }
}

/// Read-side chunk accessor
///
/// Opens a byte-oriented resource as a single outer chunk and exposes its
/// sub-chunks for sequential payload reads. All reads are positioned
/// explicitly, so interleaved reads of different sub-chunks stay correct.
#[derive(Debug)]
pub struct ChunkReader<R: Read + Seek> {
    inner: Option<R>,
    header: ChunkHeader,
    payload_start: u64,
    consumed: u64,
    subchunks: Vec<Subchunk>,
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Open a chunked resource by reading the outermost chunk header.
    pub fn open(mut inner: R) -> Result<Self> {
        let mut raw = [0u8; 8];
        inner.read_exact(&mut raw).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::format("truncated chunk header")
            } else {
                Error::Io(e)
            }
        })?;
        let payload_start = inner.stream_position()?;
        Ok(ChunkReader {
            inner: Some(inner),
            header: ChunkHeader::from_bytes(raw),
            payload_start,
            consumed: 0,
            subchunks: Vec::new(),
        })
    }

    /// Identifier of the outer chunk
    pub fn id(&self) -> [u8; 4] {
        self.header.id
    }

    /// Declared payload length of the outer chunk
    pub fn size(&self) -> u32 {
        self.header.size
    }

    /// Sequential read from the outer chunk payload.
    ///
    /// Fails with [`Error::EndOfStream`] once the declared payload length
    /// is exhausted.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<()> {
        if self.consumed + dest.len() as u64 > self.header.size as u64 {
            return Err(Error::EndOfStream);
        }
        let position = self.payload_start + self.consumed;
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk reader is closed"))?;
        inner.seek(SeekFrom::Start(position))?;
        inner.read_exact(dest)?;
        self.consumed += dest.len() as u64;
        Ok(())
    }

    /// Enumerate sub-chunks from the current payload position to the end of
    /// the declared payload, preserving file order.
    ///
    /// A clean end-of-file mid-scan terminates the enumeration; any other
    /// I/O failure propagates.
    pub fn parse_subchunks(&mut self) -> Result<()> {
        let payload_end = self.payload_start + self.header.size as u64;
        let mut position = self.payload_start + self.consumed;
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk reader is closed"))?;
        inner.seek(SeekFrom::Start(position))?;
        while position + 8 <= payload_end {
            let mut raw = [0u8; 8];
            match inner.read_exact(&mut raw) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
            let header = ChunkHeader::from_bytes(raw);
            let offset = position + 8;
            self.subchunks.push(Subchunk {
                id: header.id,
                size: header.size,
                offset,
                cursor: 0,
            });
            // skip the payload plus the pad byte after odd sizes
            let mut next = offset + header.size as u64;
            if header.size % 2 != 0 {
                next += 1;
            }
            inner.seek(SeekFrom::Start(next))?;
            position = next;
        }
        Ok(())
    }

    /// Ordered view of the sub-chunks found by [`parse_subchunks`]
    ///
    /// [`parse_subchunks`]: ChunkReader::parse_subchunks
    pub fn subchunks(&self) -> &[Subchunk] {
        &self.subchunks
    }

    /// Sequential read from sub-chunk `index`, advancing that sub-chunk's
    /// own cursor.
    ///
    /// Fails with [`Error::EndOfStream`] when the request exceeds the
    /// sub-chunk's remaining declared bytes.
    pub fn read_subchunk(&mut self, index: usize, dest: &mut [u8]) -> Result<()> {
        let chunk = self
            .subchunks
            .get(index)
            .copied()
            .ok_or_else(|| Error::state(format!("no sub-chunk at index {index}")))?;
        if dest.len() as u64 > chunk.remaining() as u64 {
            return Err(Error::EndOfStream);
        }
        let inner = self
            .inner
            .as_mut()
            .ok_or_else(|| Error::state("chunk reader is closed"))?;
        inner.seek(SeekFrom::Start(chunk.offset + chunk.cursor as u64))?;
        inner.read_exact(dest)?;
        self.subchunks[index].cursor += dest.len() as u32;
        Ok(())
    }

    /// Release the underlying resource. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        self.inner.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn container(subchunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"WAVE");
        for (id, data) in subchunks {
            payload.extend_from_slice(*id);
            payload.extend_from_slice(&(data.len() as u32).to_le_bytes());
            payload.extend_from_slice(data);
            if data.len() % 2 != 0 {
                payload.push(0);
            }
        }
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    #[test]
    fn test_open_reads_outer_header() {
        let data = container(&[]);
        let reader = ChunkReader::open(Cursor::new(data)).unwrap();
        assert_eq!(reader.id(), *b"RIFF");
        assert_eq!(reader.size(), 4);
    }

    #[test]
    fn test_open_truncated_header() {
        let err = ChunkReader::open(Cursor::new(vec![b'R', b'I'])).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_parse_subchunks_in_order() {
        let data = container(&[(b"abcd", &[1, 2, 3, 4]), (b"data", &[5, 6])]);
        let mut reader = ChunkReader::open(Cursor::new(data)).unwrap();
        let mut marker = [0u8; 4];
        reader.read(&mut marker).unwrap();
        assert_eq!(&marker, b"WAVE");
        reader.parse_subchunks().unwrap();
        let subchunks = reader.subchunks();
        assert_eq!(subchunks.len(), 2);
        assert_eq!(subchunks[0].id, *b"abcd");
        assert_eq!(subchunks[0].size, 4);
        assert_eq!(subchunks[1].id, *b"data");
        assert_eq!(subchunks[1].size, 2);
    }

    #[test]
    fn test_odd_sized_chunk_is_padded() {
        let data = container(&[(b"odd ", &[9, 9, 9]), (b"data", &[1, 2])]);
        let mut reader = ChunkReader::open(Cursor::new(data)).unwrap();
        let mut marker = [0u8; 4];
        reader.read(&mut marker).unwrap();
        reader.parse_subchunks().unwrap();
        assert_eq!(reader.subchunks().len(), 2);
        assert_eq!(reader.subchunks()[1].id, *b"data");
        let mut payload = [0u8; 2];
        reader.read_subchunk(1, &mut payload).unwrap();
        assert_eq!(payload, [1, 2]);
    }

    #[test]
    fn test_sequential_subchunk_reads() {
        let data = container(&[(b"data", &[10, 11, 12, 13])]);
        let mut reader = ChunkReader::open(Cursor::new(data)).unwrap();
        let mut marker = [0u8; 4];
        reader.read(&mut marker).unwrap();
        reader.parse_subchunks().unwrap();
        let mut first = [0u8; 2];
        let mut second = [0u8; 2];
        reader.read_subchunk(0, &mut first).unwrap();
        reader.read_subchunk(0, &mut second).unwrap();
        assert_eq!(first, [10, 11]);
        assert_eq!(second, [12, 13]);
        let err = reader.read_subchunk(0, &mut [0u8; 1]).unwrap_err();
        assert!(matches!(err, Error::EndOfStream));
    }

    #[test]
    fn test_scan_stops_at_clean_eof() {
        // declared outer size larger than the actual file
        let mut data = container(&[(b"data", &[1, 2])]);
        data[4..8].copy_from_slice(&1000u32.to_le_bytes());
        let mut reader = ChunkReader::open(Cursor::new(data)).unwrap();
        let mut marker = [0u8; 4];
        reader.read(&mut marker).unwrap();
        reader.parse_subchunks().unwrap();
        assert_eq!(reader.subchunks().len(), 1);
    }

    #[test]
    fn test_close_is_idempotent() {
        let data = container(&[]);
        let mut reader = ChunkReader::open(Cursor::new(data)).unwrap();
        reader.close().unwrap();
        reader.close().unwrap();
        let err = reader.read(&mut [0u8; 1]).unwrap_err();
        assert!(matches!(err, Error::State(_)));
    }
}
