//! The unit of data moved through a pipeline on each step.

use bytes::Bytes;

use crate::core::error::Error;

/// Default maximum chunk length produced by block-oriented sources.
pub const BLOCK_SIZE: usize = 2048;

/// One round's worth of output from a source or filter.
///
/// Exactly one of four states is carried:
///
/// - `Data` — some bytes. A zero-length `Data` behaves exactly like `Empty`.
/// - `Empty` — nothing useful this round; not an error and not end of stream.
///   Callers keep driving.
/// - `Eof` — no more data will ever be produced.
/// - `Error` — the round failed. Terminal for the whole pipeline.
#[derive(Debug, Clone)]
pub enum Chunk {
    Data(Bytes),
    Empty,
    Eof,
    Error(Error),
}

impl Chunk {
    /// Build a data chunk, normalizing zero-length input to `Empty`.
    pub fn data(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            Chunk::Empty
        } else {
            Chunk::Data(bytes)
        }
    }

    /// Build an error chunk.
    pub fn error(error: impl Into<Error>) -> Self {
        Chunk::Error(error.into())
    }

    /// True for `Empty` and for zero-length `Data`.
    pub fn is_empty(&self) -> bool {
        match self {
            Chunk::Empty => true,
            Chunk::Data(bytes) => bytes.is_empty(),
            _ => false,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Chunk::Eof)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Chunk::Error(_))
    }

    /// True when the round must stop here: end of stream or failure.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Chunk::Eof | Chunk::Error(_))
    }

    /// Returns the payload of a non-empty data chunk.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Chunk::Data(bytes) if !bytes.is_empty() => Some(&bytes[..]),
            _ => None,
        }
    }

    /// Consumes the chunk, returning the payload of a non-empty data chunk.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Chunk::Data(bytes) if !bytes.is_empty() => Some(bytes),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Chunk::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Length in bytes; zero for every non-data state.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Data(bytes) => bytes.len(),
            _ => 0,
        }
    }
}

impl From<Bytes> for Chunk {
    fn from(bytes: Bytes) -> Self {
        Chunk::data(bytes)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(bytes: Vec<u8>) -> Self {
        Chunk::data(bytes)
    }
}

impl From<&'static str> for Chunk {
    fn from(s: &'static str) -> Self {
        Chunk::data(s)
    }
}

impl From<String> for Chunk {
    fn from(s: String) -> Self {
        Chunk::data(s)
    }
}

impl From<Error> for Chunk {
    fn from(e: Error) -> Self {
        Chunk::Error(e)
    }
}
