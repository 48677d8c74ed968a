//! Sources built out of other sources.

use crate::core::{Chunk, Filter, Source};

/// A source that passes every pulled chunk through a filter.
///
/// Each call pulls exactly one chunk from the inner source and hands the
/// filter's answer straight back. It never loops to drain a filter that
/// needs several inputs before producing output; the filter's `Empty`
/// result is returned and the caller pulls again.
pub struct ChainSource<S, F> {
    source: S,
    filter: F,
}

impl<S, F> ChainSource<S, F> {
    /// Create a new chained source
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }

    /// Recover the inner source and filter
    pub fn into_parts(self) -> (S, F) {
        (self.source, self.filter)
    }
}

impl<S: Source, F: Filter> Source for ChainSource<S, F> {
    fn pull(&mut self) -> Chunk {
        let chunk = self.source.pull();
        self.filter.filter(chunk)
    }
}

/// A source that drains several sources in order.
///
/// End of stream from one source moves on to the next; only the last
/// source's end of stream is reported. Errors are returned as-is and do
/// not advance to the next source.
pub struct CatSource {
    sources: Vec<Box<dyn Source>>,
    current: usize,
}

impl CatSource {
    /// Create a new concatenating source with no inner sources
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            current: 0,
        }
    }

    /// Append a source to drain after the ones already added
    pub fn add_source<S>(mut self, source: S) -> Self
    where
        S: Source + 'static,
    {
        self.sources.push(Box::new(source));
        self
    }
}

impl Default for CatSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for CatSource {
    fn pull(&mut self) -> Chunk {
        while let Some(source) = self.sources.get_mut(self.current) {
            match source.pull() {
                Chunk::Eof => {
                    tracing::trace!(index = self.current, "cat source advancing");
                    self.current += 1;
                }
                chunk => return chunk,
            }
        }
        Chunk::Eof
    }
}

/// A source that lets consumers push chunks back.
///
/// Pushed-back chunks are returned by subsequent pulls, most recent first,
/// before the inner source is consulted again.
pub struct RewindSource<S> {
    source: S,
    pushed: Vec<Chunk>,
}

impl<S> RewindSource<S> {
    /// Create a new rewind source
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushed: Vec::new(),
        }
    }

    /// Return a chunk to the front of the stream.
    ///
    /// Empty chunks carry nothing and are dropped.
    pub fn unread(&mut self, chunk: Chunk) {
        if !chunk.is_empty() {
            self.pushed.push(chunk);
        }
    }
}

impl<S: Source> Source for RewindSource<S> {
    fn pull(&mut self) -> Chunk {
        match self.pushed.pop() {
            Some(chunk) => chunk,
            None => self.source.pull(),
        }
    }
}
