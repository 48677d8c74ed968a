//! Sink implementations for the chunkpump library.
//!
//! This module provides concrete sinks that consume chunks at the end of a
//! processing pipeline. Sinks wrapping other sinks live in [`combinators`].

pub mod combinators;

pub use combinators::FilteredSink;

use bytes::{Bytes, BytesMut};
use std::io::Write;

use crate::core::{Chunk, Error, IntoError, Sink};

/// A sink that discards everything and never asks to stop
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NullSink {
    /// Create a new null sink
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NullSink {
    fn push(&mut self, _chunk: Chunk) -> bool {
        true
    }
}

/// A sink that collects chunks into a vector, in arrival order.
///
/// End of stream is *not* a normal completion signal here: pushing `Eof`
/// (or an error) returns `false`. Drivers that stop on end of stream before
/// delivering it, like [`drain`](crate::pump::drain), never hit this case;
/// a [`step`](crate::pump::step) loop sees `false` once the stream ends.
/// Empty chunks are ignored.
#[derive(Debug, Default, Clone)]
pub struct CollectSink {
    items: Vec<Bytes>,
}

impl CollectSink {
    /// Create a new collect sink
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a collect sink that appends to existing items
    pub fn with_items(items: Vec<Bytes>) -> Self {
        Self { items }
    }

    /// The chunks collected so far
    pub fn items(&self) -> &[Bytes] {
        &self.items
    }

    /// Consume the sink, returning the collected chunks
    pub fn into_items(self) -> Vec<Bytes> {
        self.items
    }

    /// All collected chunks joined into one buffer
    pub fn concat(&self) -> Bytes {
        let total = self.items.iter().map(Bytes::len).sum();
        let mut buf = BytesMut::with_capacity(total);
        for item in &self.items {
            buf.extend_from_slice(item);
        }
        buf.freeze()
    }
}

impl Sink for CollectSink {
    fn push(&mut self, chunk: Chunk) -> bool {
        match chunk {
            Chunk::Data(bytes) => {
                if !bytes.is_empty() {
                    self.items.push(bytes);
                }
                true
            }
            Chunk::Empty => true,
            Chunk::Eof | Chunk::Error(_) => false,
        }
    }
}

/// A sink that refuses every chunk
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorSink;

impl ErrorSink {
    /// Create a new error sink
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ErrorSink {
    fn push(&mut self, _chunk: Chunk) -> bool {
        false
    }
}

/// A sink that writes chunks to any [`Write`] implementation.
///
/// Data is written in full. End of stream flushes the writer. Error chunks
/// and write or flush failures (as [`Error::Sink`]) return `false`, and the
/// failure is kept for inspection through
/// [`last_error`](WriterSink::last_error).
pub struct WriterSink<W> {
    writer: W,
    last_error: Option<Error>,
}

impl<W: Write> WriterSink<W> {
    /// Create a new writer sink
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// The most recent failure seen by this sink
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Get a reference to the wrapped writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn fail(&mut self, error: Error) -> bool {
        tracing::debug!(error = %error, "writer sink failed");
        self.last_error = Some(error);
        false
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn push(&mut self, chunk: Chunk) -> bool {
        match chunk {
            Chunk::Data(bytes) => match self.writer.write_all(&bytes).into_sink_error() {
                Ok(()) => true,
                Err(e) => self.fail(e),
            },
            Chunk::Empty => true,
            Chunk::Eof => match self.writer.flush().into_sink_error() {
                Ok(()) => true,
                Err(e) => self.fail(e),
            },
            Chunk::Error(e) => self.fail(e),
        }
    }
}

/// Helper function to create a sink from a function
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(Chunk) -> bool,
{
    FnSink { f }
}

/// A sink created from a function
pub struct FnSink<F> {
    f: F,
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(Chunk) -> bool,
{
    fn push(&mut self, chunk: Chunk) -> bool {
        (self.f)(chunk)
    }
}
