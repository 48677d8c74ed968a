//! Drivers that move chunks from a source into a sink.
//!
//! [`step`] moves a single chunk. [`drain`] keeps going until the stream
//! ends or something fails. [`Pump`] is the same loop as an explicit state
//! machine for callers that want to drive it one round at a time.

use crate::core::{Chunk, Sink, Source};

/// Where a [`Pump`] is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    /// Still pulling
    Running,
    /// The source reached end of stream without error
    DoneOk,
    /// The source failed or the sink refused a chunk
    DoneFail,
}

impl PumpState {
    pub fn is_done(&self) -> bool {
        !matches!(self, PumpState::Running)
    }
}

/// Pull exactly one chunk and hand it, unmodified, to the sink.
///
/// End of stream and errors are forwarded like anything else; the sink's
/// answer is returned.
pub fn step<S, K>(source: &mut S, sink: &mut K) -> bool
where
    S: Source + ?Sized,
    K: Sink + ?Sized,
{
    let chunk = source.pull();
    sink.push(chunk)
}

/// Pump until the source ends or something fails.
///
/// Returns `true` only if the source reached end of stream without an error
/// and the sink accepted every chunk delivered along the way. Empty chunks
/// are skipped without calling the sink. End of stream itself is never
/// delivered to the sink.
pub fn drain<S, K>(source: &mut S, sink: &mut K) -> bool
where
    S: Source + ?Sized,
    K: Sink + ?Sized,
{
    let mut pump = Pump::new(source, sink);
    pump.run() == PumpState::DoneOk
}

/// A source/sink pair driven one round at a time.
pub struct Pump<S, K> {
    source: S,
    sink: K,
    state: PumpState,
    chunks: usize,
    bytes: usize,
}

impl<S: Source, K: Sink> Pump<S, K> {
    /// Create a new pump in the `Running` state
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            state: PumpState::Running,
            chunks: 0,
            bytes: 0,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    /// Number of chunks delivered to the sink so far
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Number of bytes delivered to the sink so far
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Perform one round.
    ///
    /// Once the pump is done this is a no-op that keeps returning the
    /// terminal state.
    pub fn step(&mut self) -> PumpState {
        if self.state.is_done() {
            return self.state;
        }

        self.state = match self.source.pull() {
            Chunk::Eof => {
                tracing::trace!(chunks = self.chunks, bytes = self.bytes, "source exhausted");
                PumpState::DoneOk
            }
            Chunk::Error(e) => {
                tracing::debug!(error = %e, "source failed");
                PumpState::DoneFail
            }
            chunk if chunk.is_empty() => PumpState::Running,
            chunk => {
                let len = chunk.len();
                if self.sink.push(chunk) {
                    self.chunks += 1;
                    self.bytes += len;
                    #[cfg(feature = "metrics")]
                    crate::metrics::record_chunk(len);
                    PumpState::Running
                } else {
                    tracing::debug!(chunks = self.chunks, "sink refused chunk");
                    PumpState::DoneFail
                }
            }
        };

        if self.state.is_done() {
            self.record_outcome();
        }

        self.state
    }

    fn record_outcome(&self) {
        #[cfg(feature = "metrics")]
        crate::metrics::record_outcome(self.state);
    }

    /// Step until the pump reaches a terminal state
    pub fn run(&mut self) -> PumpState {
        while !self.state.is_done() {
            self.step();
        }
        self.state
    }

    /// Recover the source and sink
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
