//! Sinks that wrap other sinks.

use crate::core::{Chunk, Filter, Sink};

/// A sink that runs each incoming chunk through a filter first.
///
/// When the filter ends the round (end of stream or error) the sink answers
/// `false` without touching the inner sink. An empty filter result is
/// accepted without forwarding. Everything else is handed to the inner sink,
/// whose answer is returned.
pub struct FilteredSink<F, K> {
    filter: F,
    sink: K,
}

impl<F, K> FilteredSink<F, K> {
    /// Create a new filtered sink
    pub fn new(filter: F, sink: K) -> Self {
        Self { filter, sink }
    }

    /// Get a reference to the inner sink
    pub fn get_ref(&self) -> &K {
        &self.sink
    }

    /// Recover the filter and inner sink
    pub fn into_parts(self) -> (F, K) {
        (self.filter, self.sink)
    }
}

impl<F: Filter, K: Sink> Sink for FilteredSink<F, K> {
    fn push(&mut self, chunk: Chunk) -> bool {
        let out = self.filter.filter(chunk);
        if out.is_terminal() {
            return false;
        }
        if out.is_empty() {
            return true;
        }
        self.sink.push(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SinkExt;
    use crate::filters::filter_fn;
    use crate::sinks::{CollectSink, ErrorSink};
    use bytes::Bytes;

    fn drop_vowels() -> impl Filter {
        filter_fn(|b: Bytes| {
            Chunk::data(
                b.iter()
                    .copied()
                    .filter(|c| !b"aeiou".contains(c))
                    .collect::<Vec<u8>>(),
            )
        })
    }

    #[test]
    fn test_filtered_sink_forwards_filtered_data() {
        let mut sink = CollectSink::new().filtered(drop_vowels());
        assert!(sink.push("banana".into()));
        assert_eq!(&sink.get_ref().concat()[..], b"bnn");
    }

    #[test]
    fn test_filtered_sink_skips_empty_results() {
        let mut sink = CollectSink::new().filtered(drop_vowels());
        assert!(sink.push("aeiou".into()));
        assert!(sink.get_ref().items().is_empty());
    }

    #[test]
    fn test_filtered_sink_stops_on_terminal() {
        let mut sink = CollectSink::new().filtered(drop_vowels());
        assert!(!sink.push(Chunk::Eof));
        assert!(!sink.push(Chunk::error("bad")));
    }

    #[test]
    fn test_filtered_sink_returns_inner_answer() {
        let mut sink = FilteredSink::new(drop_vowels(), ErrorSink::new());
        assert!(!sink.push("xyz".into()));
    }
}
