//! Source implementations for the chunkpump library.
//!
//! This module provides concrete sources that generate chunks for
//! processing pipelines. Sources built from other sources live in
//! [`combinators`].

pub mod combinators;

pub use combinators::{CatSource, ChainSource, RewindSource};

use bytes::Bytes;
use std::io::{ErrorKind, Read};

use crate::core::{Chunk, Error, Result, Source, BLOCK_SIZE};

/// A source with nothing to produce: every call yields `Eof`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

impl EmptySource {
    /// Create a new empty source
    pub fn new() -> Self {
        Self
    }
}

impl Source for EmptySource {
    fn pull(&mut self) -> Chunk {
        Chunk::Eof
    }
}

/// A source that hands out a fixed buffer in blocks.
///
/// Every call yields the next `block_size` bytes of whatever remains. The
/// final block is exactly as long as the remainder, and once the buffer is
/// exhausted every call yields `Eof`.
#[derive(Debug, Clone)]
pub struct StringSource {
    data: Bytes,
    offset: usize,
    block_size: usize,
}

impl StringSource {
    /// Create a new string source using the default block size
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            offset: 0,
            block_size: BLOCK_SIZE,
        }
    }

    /// Create a string source with a custom block size.
    ///
    /// A block size of zero could never make progress and is rejected.
    pub fn with_block_size(data: impl Into<Bytes>, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::config("block size must be greater than zero"));
        }
        Ok(Self {
            data: data.into(),
            offset: 0,
            block_size,
        })
    }

    /// The number of bytes not yet produced
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Source for StringSource {
    fn pull(&mut self) -> Chunk {
        let remaining = self.remaining();
        if remaining == 0 {
            return Chunk::Eof;
        }

        let len = remaining.min(self.block_size);
        let block = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Chunk::Data(block)
    }
}

/// A source that fails on every call with the same error
#[derive(Debug, Clone)]
pub struct ErrorSource {
    error: Error,
}

impl ErrorSource {
    /// Create a new error source
    pub fn new(error: impl Into<Error>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl Source for ErrorSource {
    fn pull(&mut self) -> Chunk {
        Chunk::Error(self.error.clone())
    }
}

/// A source that reads blocks from any [`Read`] implementation.
///
/// A read of zero bytes marks end of stream. An interrupted read yields an
/// empty chunk so the caller simply pulls again; any other I/O failure
/// becomes an [`Error::Source`] chunk.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Create a new reader source using the default block size
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; BLOCK_SIZE],
            done: false,
        }
    }

    /// Create a reader source that reads at most `block_size` bytes per call
    pub fn with_block_size(reader: R, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::config("block size must be greater than zero"));
        }
        Ok(Self {
            reader,
            buf: vec![0; block_size],
            done: false,
        })
    }

    /// Recover the wrapped reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn pull(&mut self) -> Chunk {
        if self.done {
            return Chunk::Eof;
        }

        match self.reader.read(&mut self.buf) {
            Ok(0) => {
                tracing::trace!("reader source exhausted");
                self.done = true;
                Chunk::Eof
            }
            Ok(n) => Chunk::Data(Bytes::copy_from_slice(&self.buf[..n])),
            Err(e) if e.kind() == ErrorKind::Interrupted => Chunk::Empty,
            Err(e) => {
                tracing::debug!(error = %e, "reader source failed");
                Chunk::Error(Error::source(e))
            }
        }
    }
}

/// Helper function to create a source from a function
pub fn source_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut() -> Chunk,
{
    FnSource { f }
}

/// A source created from a function
pub struct FnSource<F> {
    f: F,
}

impl<F> Source for FnSource<F>
where
    F: FnMut() -> Chunk,
{
    fn pull(&mut self) -> Chunk {
        (self.f)()
    }
}
