//! Core traits for the source/filter/sink system.
//!
//! This module defines the three leaf contracts. Each is a single method on
//! `&mut self`, so any private state a stage needs lives in the implementing
//! struct and is owned by exactly one instance.
//!
//! Combinators are reached through the `*Ext` traits, which are implemented
//! for every type implementing the matching contract.

use crate::core::chunk::Chunk;

/// A source produces one chunk per call.
///
/// A source must yield [`Chunk::Eof`] once its underlying data is exhausted.
///
/// # Examples
///
/// ```rust
/// use chunkpump::core::{Chunk, Source};
///
/// struct Countdown(u8);
///
/// impl Source for Countdown {
///     fn pull(&mut self) -> Chunk {
///         if self.0 == 0 {
///             return Chunk::Eof;
///         }
///         self.0 -= 1;
///         Chunk::data(vec![b'0' + self.0])
///     }
/// }
///
/// let mut src = Countdown(2);
/// assert_eq!(src.pull().as_bytes(), Some(&b"1"[..]));
/// assert_eq!(src.pull().as_bytes(), Some(&b"0"[..]));
/// assert!(src.pull().is_eof());
/// ```
pub trait Source {
    /// Produce the next chunk.
    fn pull(&mut self) -> Chunk;
}

/// A filter transforms one chunk into another.
///
/// Well-behaved filters return `Eof` and `Error` input unchanged and treat
/// `Empty` input as a no-op.
///
/// # Examples
///
/// ```rust
/// use chunkpump::core::{Chunk, Filter};
///
/// struct Upper;
///
/// impl Filter for Upper {
///     fn filter(&mut self, chunk: Chunk) -> Chunk {
///         match chunk {
///             Chunk::Data(bytes) => Chunk::data(bytes.to_ascii_uppercase()),
///             other => other,
///         }
///     }
/// }
///
/// assert_eq!(Upper.filter("abc".into()).as_bytes(), Some(&b"ABC"[..]));
/// assert!(Upper.filter(Chunk::Eof).is_eof());
/// ```
pub trait Filter {
    /// Transform a single chunk.
    fn filter(&mut self, chunk: Chunk) -> Chunk;
}

/// A sink consumes chunks.
///
/// The returned flag is the continue signal: `true` to keep pumping,
/// `false` to stop because the sink failed or refused the chunk.
///
/// # Examples
///
/// ```rust
/// use chunkpump::core::{Chunk, Sink};
///
/// struct ByteCounter(usize);
///
/// impl Sink for ByteCounter {
///     fn push(&mut self, chunk: Chunk) -> bool {
///         self.0 += chunk.len();
///         !chunk.is_error()
///     }
/// }
///
/// let mut sink = ByteCounter(0);
/// assert!(sink.push("hello".into()));
/// assert_eq!(sink.0, 5);
/// ```
pub trait Sink {
    /// Consume a single chunk, returning whether pumping should continue.
    fn push(&mut self, chunk: Chunk) -> bool;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn pull(&mut self) -> Chunk {
        (**self).pull()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn pull(&mut self) -> Chunk {
        (**self).pull()
    }
}

impl<F: Filter + ?Sized> Filter for &mut F {
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        (**self).filter(chunk)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        (**self).filter(chunk)
    }
}

impl<K: Sink + ?Sized> Sink for &mut K {
    fn push(&mut self, chunk: Chunk) -> bool {
        (**self).push(chunk)
    }
}

impl<K: Sink + ?Sized> Sink for Box<K> {
    fn push(&mut self, chunk: Chunk) -> bool {
        (**self).push(chunk)
    }
}

/// Extension trait for sources that provides combinator methods
pub trait SourceExt: Source {
    /// Pass every pulled chunk through `filter` once
    fn chain<F>(self, filter: F) -> crate::sources::combinators::ChainSource<Self, F>
    where
        Self: Sized,
        F: Filter,
    {
        crate::sources::combinators::ChainSource::new(self, filter)
    }

    /// Continue with `next` once this source reaches end of stream
    fn cat<S>(self, next: S) -> crate::sources::combinators::CatSource
    where
        Self: Sized + 'static,
        S: Source + 'static,
    {
        crate::sources::combinators::CatSource::new()
            .add_source(self)
            .add_source(next)
    }

    /// Allow chunks to be pushed back in front of this source
    fn rewind(self) -> crate::sources::combinators::RewindSource<Self>
    where
        Self: Sized,
    {
        crate::sources::combinators::RewindSource::new(self)
    }

    /// View this source as an iterator of data payloads
    fn into_iter_chunks(self) -> crate::util::SourceIter<Self>
    where
        Self: Sized,
    {
        crate::util::SourceIter::new(self)
    }
}

impl<S: Source> SourceExt for S {}

/// Extension trait for filters
pub trait FilterExt: Filter {
    /// Apply `next` to whatever this filter produces
    fn then<F>(self, next: F) -> crate::filters::combinators::ChainTwo<Self, F>
    where
        Self: Sized,
        F: Filter,
    {
        crate::filters::combinators::ChainTwo::new(self, next)
    }
}

impl<F: Filter> FilterExt for F {}

/// Extension trait for sinks
pub trait SinkExt: Sink {
    /// Run every incoming chunk through `filter` before it reaches this sink
    fn filtered<F>(self, filter: F) -> crate::sinks::combinators::FilteredSink<F, Self>
    where
        Self: Sized,
        F: Filter,
    {
        crate::sinks::combinators::FilteredSink::new(filter, self)
    }
}

impl<K: Sink> SinkExt for K {}
