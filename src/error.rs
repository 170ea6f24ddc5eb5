//! Error types for wavio

use thiserror::Error;

/// Result type alias for wavio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavio
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource could not be opened
    #[error("Open error: {0}")]
    Open(String),

    /// Malformed container (missing/incorrect RIFF or WAVE magic, bad fmt payload)
    #[error("Format error: {0}")]
    Format(String),

    /// Format tag is not uncompressed linear PCM
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Sub-chunks appear in an order the format forbids
    #[error("Chunk order error: {0}")]
    ChunkOrder(String),

    /// A required sub-chunk was absent after the full scan
    #[error("Missing chunk: {0}")]
    MissingChunk(String),

    /// Invalid parameter supplied to the writer
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation not legal in the session's current state
    #[error("State error: {0}")]
    State(String),

    /// Sequential read exhausted the chunk payload
    #[error("End of stream")]
    EndOfStream,
}

impl Error {
    /// Create an open error
    pub fn open<S: Into<String>>(msg: S) -> Self {
        Error::Open(msg.into())
    }

    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an unsupported format error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::UnsupportedFormat(msg.into())
    }

    /// Create a chunk order error
    pub fn chunk_order<S: Into<String>>(msg: S) -> Self {
        Error::ChunkOrder(msg.into())
    }

    /// Create a missing chunk error
    pub fn missing_chunk<S: Into<String>>(msg: S) -> Self {
        Error::MissingChunk(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a state error
    pub fn state<S: Into<String>>(msg: S) -> Self {
        Error::State(msg.into())
    }
}
