//! Adapters between sources and the standard iteration traits.

use bytes::Bytes;
use futures_core::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::core::{Chunk, Result, Source};

/// A source viewed as an iterator of data payloads.
///
/// Empty chunks are skipped. End of stream ends the iteration. An error is
/// yielded once, after which the iterator is fused.
pub struct SourceIter<S> {
    source: S,
    done: bool,
}

impl<S: Source> SourceIter<S> {
    /// Create a new source iterator
    pub fn new(source: S) -> Self {
        Self {
            source,
            done: false,
        }
    }

    /// Recover the wrapped source
    pub fn into_inner(self) -> S {
        self.source
    }

    fn next_item(&mut self) -> Option<Result<Bytes>> {
        if self.done {
            return None;
        }
        loop {
            match self.source.pull() {
                Chunk::Data(bytes) if !bytes.is_empty() => return Some(Ok(bytes)),
                Chunk::Data(_) | Chunk::Empty => continue,
                Chunk::Eof => {
                    self.done = true;
                    return None;
                }
                Chunk::Error(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S: Source> Iterator for SourceIter<S> {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item()
    }
}

impl<S: Source> std::iter::FusedIterator for SourceIter<S> {}

/// A source exposed as an always-ready [`Stream`].
///
/// Pulling never blocks on anything but the source itself, so every poll
/// completes immediately with the same items [`SourceIter`] would produce.
pub struct SourceStream<S> {
    inner: SourceIter<S>,
}

impl<S: Source> SourceStream<S> {
    /// Create a new source stream
    pub fn new(source: S) -> Self {
        Self {
            inner: SourceIter::new(source),
        }
    }
}

impl<S: Source + Unpin> Stream for SourceStream<S> {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.inner.next_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, SourceExt};
    use crate::sources::{source_fn, CatSource, ErrorSource, StringSource};
    use futures::executor::block_on;
    use futures::StreamExt;

    #[test]
    fn test_source_iter_skips_empty() {
        let mut script = vec![Chunk::Eof, "b".into(), Chunk::Empty, "a".into()];
        let src = source_fn(move || script.pop().unwrap_or(Chunk::Eof));
        let items: Vec<Bytes> = src.into_iter_chunks().collect::<Result<_>>().unwrap();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_source_iter_yields_error_once() {
        let src = CatSource::new()
            .add_source(StringSource::new("ok"))
            .add_source(ErrorSource::new("broken"));
        let mut iter = src.into_iter_chunks();
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_source_stream_collects() {
        let stream = SourceStream::new(StringSource::with_block_size("abcde", 2).unwrap());
        let items: Vec<Result<Bytes>> = block_on(stream.collect());
        let joined: Vec<u8> = items.into_iter().flat_map(|r| r.unwrap().to_vec()).collect();
        assert_eq!(joined, b"abcde");
    }

    #[test]
    fn test_source_stream_ends_after_error() {
        let src = StringSource::new("ok").cat(ErrorSource::new("broken"));
        let items: Vec<Result<Bytes>> = block_on(SourceStream::new(src).collect());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().ok().map(|b| &b[..]), Some(&b"ok"[..]));
        assert!(matches!(items[1], Err(Error::Custom(_))));
    }
}
