//! Filters composed from other filters.

use crate::core::{Chunk, Filter};

/// Applies one filter and then another.
///
/// If the first filter ends the round, with end of stream or an error, its
/// result is returned and the second filter is never invoked.
pub struct ChainTwo<F1, F2> {
    first: F1,
    second: F2,
}

impl<F1, F2> ChainTwo<F1, F2> {
    /// Create a new pairwise chain
    pub fn new(first: F1, second: F2) -> Self {
        Self { first, second }
    }
}

impl<F1: Filter, F2: Filter> Filter for ChainTwo<F1, F2> {
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        let out = self.first.filter(chunk);
        if out.is_terminal() {
            return out;
        }
        self.second.filter(out)
    }
}

/// Applies an ordered list of filters to each chunk.
///
/// After every filter the result is checked: end of stream and errors are
/// returned immediately, and so is an empty result, so later filters never
/// see a no-op round. Each filter keeps its own state; nothing is shared
/// between neighbours. An empty chain returns its input unchanged.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Create a new, empty filter chain
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter to the end of the chain
    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Append an already boxed filter
    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for FilterChain {
    fn filter(&mut self, chunk: Chunk) -> Chunk {
        let mut current = chunk;
        for filter in self.filters.iter_mut() {
            current = filter.filter(current);
            if current.is_terminal() {
                return current;
            }
            if current.is_empty() {
                return Chunk::Empty;
            }
        }
        current
    }
}

impl FromIterator<Box<dyn Filter>> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn Filter>>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, FilterExt};
    use crate::filters::filter_fn;
    use bytes::Bytes;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A filter that records how often it ran and appends a marker byte
    fn tagged(tag: u8, calls: Rc<Cell<usize>>) -> impl Filter {
        filter_fn(move |b: Bytes| {
            calls.set(calls.get() + 1);
            let mut out = b.to_vec();
            out.push(tag);
            Chunk::data(out)
        })
    }

    /// A raw filter that maps every chunk to a fixed result
    struct Always(fn() -> Chunk);

    impl Filter for Always {
        fn filter(&mut self, _chunk: Chunk) -> Chunk {
            (self.0)()
        }
    }

    #[test]
    fn test_chain_two_applies_in_order() {
        let calls = Rc::new(Cell::new(0));
        let mut f = tagged(b'1', calls.clone()).then(tagged(b'2', calls.clone()));
        assert_eq!(f.filter("x".into()).as_bytes(), Some(&b"x12"[..]));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_chain_two_short_circuits_on_eof_and_error() {
        let calls = Rc::new(Cell::new(0));
        let mut eof = Always(|| Chunk::Eof).then(tagged(b'2', calls.clone()));
        assert!(eof.filter("x".into()).is_eof());

        let failing = Always(|| Chunk::Error(Error::custom("bad")));
        let mut err = failing.then(tagged(b'2', calls.clone()));
        assert!(err.filter("x".into()).is_error());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_filter_chain_runs_every_filter() {
        let calls = Rc::new(Cell::new(0));
        let mut chain = FilterChain::new()
            .add_filter(tagged(b'a', calls.clone()))
            .add_filter(tagged(b'b', calls.clone()))
            .add_filter(tagged(b'c', calls.clone()));
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.filter("-".into()).as_bytes(), Some(&b"-abc"[..]));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_filter_chain_stops_on_empty() {
        let calls = Rc::new(Cell::new(0));
        let mut chain = FilterChain::new()
            .add_filter(Always(|| Chunk::Empty))
            .add_filter(tagged(b'b', calls.clone()));
        assert!(chain.filter("x".into()).is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_filter_chain_stops_on_terminal() {
        let calls = Rc::new(Cell::new(0));
        let mut chain: FilterChain = vec![
            Box::new(Always(|| Chunk::Error(Error::custom("bad")))) as Box<dyn Filter>,
            Box::new(tagged(b'b', calls.clone())),
        ]
        .into_iter()
        .collect();
        assert!(chain.filter("x".into()).is_error());

        let mut chain = FilterChain::new()
            .add_filter(Always(|| Chunk::Eof))
            .add_filter(tagged(b'b', calls.clone()));
        assert!(chain.filter("x".into()).is_eof());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_empty_filter_chain_is_identity() {
        let mut chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.filter("x".into()).as_bytes(), Some(&b"x"[..]));
    }
}
