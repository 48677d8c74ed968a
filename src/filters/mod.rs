//! Filter implementations for the chunkpump library.
//!
//! This module provides filters that transform chunks flowing through
//! processing pipelines. Filters composed from other filters live in
//! [`combinators`].

pub mod combinators;

pub use combinators::{ChainTwo, FilterChain};

use bytes::Bytes;

use crate::core::{Chunk, Filter, IntoError};

/// A stateful filter built from a step function.
///
/// The step function receives the filter's private context, the incoming
/// data and a read-only auxiliary value, and returns the output chunk. The
/// context is owned by this instance alone and only changes between calls.
///
/// The step function is only invoked for data. `Empty` input comes back as
/// `Empty`, and `Eof` and `Error` input come back unchanged; the context is
/// left untouched in all three cases.
///
/// # Examples
///
/// ```rust
/// use bytes::Bytes;
/// use chunkpump::core::{Chunk, Filter};
/// use chunkpump::filters::Cycle;
///
/// // prefix every chunk with a running sequence number
/// let mut numbered = Cycle::new(0u32, ":", |n: &mut u32, input: Bytes, sep: &&str| {
///     *n += 1;
///     Chunk::data(format!("{}{}{}", n, sep, String::from_utf8_lossy(&input)))
/// });
///
/// assert_eq!(numbered.filter("a".into()).as_bytes(), Some(&b"1:a"[..]));
/// assert_eq!(numbered.filter("b".into()).as_bytes(), Some(&b"2:b"[..]));
/// assert_eq!(*numbered.context(), 2);
/// ```
pub struct Cycle<C, A, F> {
    context: C,
    extra: A,
    step: F,
}

impl<C, A, F> Cycle<C, A, F>
where
    F: FnMut(&mut C, Bytes, &A) -> Chunk,
{
    /// Create a new cycle filter with an initial context
    pub fn new(context: C, extra: A, step: F) -> Self {
        Self {
            context,
            extra,
            step,
        }
    }

    /// The current context
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Consume the filter, returning its final context
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C, A, F> Filter for Cycle<C, A, F>
where
    F: FnMut(&mut C, Bytes, &A) -> Chunk,
{
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        match chunk {
            Chunk::Data(bytes) if !bytes.is_empty() => {
                (self.step)(&mut self.context, bytes, &self.extra)
            }
            Chunk::Data(_) | Chunk::Empty => Chunk::Empty,
            terminal => terminal,
        }
    }
}

/// Helper function to create a stateless filter from a function.
///
/// The function only ever sees non-empty data; every other chunk state is
/// passed through untouched.
pub fn filter_fn<F>(f: F) -> FnFilter<F>
where
    F: FnMut(Bytes) -> Chunk,
{
    FnFilter { f }
}

/// A filter created from a function
pub struct FnFilter<F> {
    f: F,
}

impl<F> Filter for FnFilter<F>
where
    F: FnMut(Bytes) -> Chunk,
{
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        match chunk {
            Chunk::Data(bytes) if !bytes.is_empty() => (self.f)(bytes),
            Chunk::Data(_) | Chunk::Empty => Chunk::Empty,
            terminal => terminal,
        }
    }
}

/// Helper function to create a filter from a fallible function.
///
/// Like [`filter_fn`], but the function may fail with any foreign error. A
/// failure becomes an [`Error::Filter`](crate::core::Error::Filter) chunk.
pub fn try_filter_fn<F, E>(f: F) -> TryFnFilter<F>
where
    F: FnMut(Bytes) -> std::result::Result<Chunk, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    TryFnFilter { f }
}

/// A filter created from a fallible function
pub struct TryFnFilter<F> {
    f: F,
}

impl<F, E> Filter for TryFnFilter<F>
where
    F: FnMut(Bytes) -> std::result::Result<Chunk, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        match chunk {
            Chunk::Data(bytes) if !bytes.is_empty() => {
                let result = (self.f)(bytes).into_filter_error();
                result.unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "filter failed");
                    Chunk::Error(e)
                })
            }
            Chunk::Data(_) | Chunk::Empty => Chunk::Empty,
            terminal => terminal,
        }
    }
}

/// A filter that passes every chunk through unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityFilter;

impl IdentityFilter {
    /// Create a new identity filter
    pub fn new() -> Self {
        Self
    }
}

impl Filter for IdentityFilter {
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        chunk
    }
}
